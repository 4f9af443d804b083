//! Terminal report generation.
//!
//! This module turns screening results into the column-aligned text
//! printed by the menu loop. Monetary values and ratios are fixed to
//! two decimals.

use crate::analysis::{PeSummary, Ranked, RecommendRule};
use crate::models::{ActivityLog, MenuChoice, Record};

/// Width of the rule under the search table header.
const TABLE_RULE_WIDTH: usize = 70;

/// Generate the main menu text, ending with the input prompt.
pub fn generate_menu() -> String {
    let mut menu = String::new();

    menu.push_str("\n=== Main Menu ===\n");
    for choice in MenuChoice::ALL {
        menu.push_str(&format!("{}) {}\n", choice.key(), choice.label()));
    }
    menu.push_str("Choose option: ");

    menu
}

/// Generate the search results table.
pub fn generate_search_report(matches: &[&Record]) -> String {
    if matches.is_empty() {
        return "No stocks matched your search.\n".to_string();
    }

    let mut section = String::new();

    section.push_str("\nMatches:\n");
    section.push_str(&format!(
        "{:<10}{:<30}{:<10}{:<8}{}\n",
        "Symbol", "Name", "Price", "P/E", "EV/EBIT"
    ));
    section.push_str(&"-".repeat(TABLE_RULE_WIDTH));
    section.push('\n');

    for record in matches {
        section.push_str(&generate_table_row(record));
    }

    section
}

/// Generate one row of the search table.
fn generate_table_row(record: &Record) -> String {
    format!(
        "{:<10}{:<30}{:<10.2}{:<8.2}{:.2}\n",
        record.symbol, record.name, record.price, record.pe_ratio, record.ev_to_ebit
    )
}

/// Generate the P/E analysis line.
///
/// `total` is the number of loaded records, used to tell "nothing loaded"
/// apart from "nothing with a usable P/E".
pub fn generate_pe_report(total: usize, summary: Option<PeSummary>) -> String {
    if total == 0 {
        return no_data_message();
    }

    match summary {
        Some(summary) => format!(
            "Average P/E (across {} stocks): {:.2}\n",
            summary.count, summary.average
        ),
        None => "No P/E data available.\n".to_string(),
    }
}

/// Generate the EV/EBIT ranking list.
pub fn generate_ranking_report(ranked: &[Ranked<'_>]) -> String {
    if ranked.is_empty() {
        return no_data_message();
    }

    let mut section = String::new();

    section.push_str(&format!(
        "Top {} stocks with lowest EV/EBIT (possible value buys):\n",
        ranked.len()
    ));

    for entry in ranked {
        let r = entry.record;
        section.push_str(&format!(
            "{}) {} | {} | EV/EBIT: {:.2} | Price: {:.2}\n",
            entry.rank, r.symbol, r.name, r.ev_to_ebit, r.price
        ));
    }

    section
}

/// Generate the recommendation list.
pub fn generate_recommendation_report(picks: &[&Record], rule: &RecommendRule) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "\nRecommendations (simple rule: P/E < {} and EV/EBIT < {}):\n",
        rule.max_pe, rule.max_ev_to_ebit
    ));

    if picks.is_empty() {
        section.push_str("No stocks match the rule.\n");
        return section;
    }

    for r in picks {
        section.push_str(&format!(
            "- {} ({})  P/E: {:.2}  EV/EBIT: {:.2}\n",
            r.symbol, r.name, r.pe_ratio, r.ev_to_ebit
        ));
    }

    section
}

/// Generate the session activity view.
pub fn generate_activity_report(log: &ActivityLog) -> String {
    let mut section = String::new();

    section.push_str("\nUser activity (this session):\n");
    section.push_str(&format!(
        "- {}  Logged in\n",
        log.started_at.format("%Y-%m-%d %H:%M:%S")
    ));

    if log.is_empty() {
        section.push_str("No other actions yet.\n");
        return section;
    }

    for entry in log.entries() {
        section.push_str(&format!(
            "- {}  {}\n",
            entry.at.format("%Y-%m-%d %H:%M:%S"),
            entry.action
        ));
    }

    section
}

fn no_data_message() -> String {
    "No stock data loaded.\n".to_string()
}
