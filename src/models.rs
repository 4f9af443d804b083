//! Data models for the screener.
//!
//! This module contains the core data structures shared by the loader,
//! the analysis functions, and the menu loop.

use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// One security's static attributes as loaded from the data file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Ticker symbol (not unique, matched case-insensitively).
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Last price.
    pub price: f64,
    /// Price-to-earnings ratio. Non-positive means not applicable.
    pub pe_ratio: f64,
    /// Enterprise-value-to-EBIT ratio. Non-positive means not applicable.
    pub ev_to_ebit: f64,
}

impl Record {
    /// Creates a new record.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        pe_ratio: f64,
        ev_to_ebit: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            pe_ratio,
            ev_to_ebit,
        }
    }

    /// Returns true if the P/E ratio is usable (strictly positive).
    pub fn has_pe(&self) -> bool {
        self.pe_ratio > 0.0
    }

    /// Returns true if the EV/EBIT ratio is usable (strictly positive).
    pub fn has_ev_to_ebit(&self) -> bool {
        self.ev_to_ebit > 0.0
    }
}

/// A main menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    Exit,
    Search,
    PeAnalysis,
    EvEbitRanking,
    Recommend,
    Activity,
}

impl MenuChoice {
    /// All choices in the order they are listed on screen.
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Search,
        MenuChoice::PeAnalysis,
        MenuChoice::EvEbitRanking,
        MenuChoice::Recommend,
        MenuChoice::Activity,
        MenuChoice::Exit,
    ];

    /// The key the user types to select this option.
    pub fn key(&self) -> char {
        match self {
            MenuChoice::Exit => '0',
            MenuChoice::Search => '1',
            MenuChoice::PeAnalysis => '2',
            MenuChoice::EvEbitRanking => '3',
            MenuChoice::Recommend => '4',
            MenuChoice::Activity => '5',
        }
    }

    /// Label shown in the main menu.
    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Exit => "Exit",
            MenuChoice::Search => "Search stocks",
            MenuChoice::PeAnalysis => "P/E analysis (show average P/E)",
            MenuChoice::EvEbitRanking => "EV/EBIT analysis (lowest first)",
            MenuChoice::Recommend => "Recommend (simple rule)",
            MenuChoice::Activity => "User activity",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Exit => write!(f, "Exit"),
            MenuChoice::Search => write!(f, "Search"),
            MenuChoice::PeAnalysis => write!(f, "P/E analysis"),
            MenuChoice::EvEbitRanking => write!(f, "EV/EBIT ranking"),
            MenuChoice::Recommend => write!(f, "Recommendation"),
            MenuChoice::Activity => write!(f, "User activity"),
        }
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(MenuChoice::Exit),
            "1" => Ok(MenuChoice::Search),
            "2" => Ok(MenuChoice::PeAnalysis),
            "3" => Ok(MenuChoice::EvEbitRanking),
            "4" => Ok(MenuChoice::Recommend),
            "5" => Ok(MenuChoice::Activity),
            other => Err(format!("unknown menu option: {:?}", other)),
        }
    }
}

/// A single timestamped action taken during the session.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub action: String,
}

/// In-memory record of what the user did this session. Never persisted.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    /// When the user logged in.
    pub started_at: DateTime<Local>,
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    /// Starts a new log for a session that begins now.
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            entries: Vec::new(),
        }
    }

    /// Appends an action stamped with the current local time.
    pub fn record(&mut self, action: impl Into<String>) {
        self.entries.push(ActivityEntry {
            at: Local::now(),
            action: action.into(),
        });
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_applicability() {
        let record = Record::new("AAPL", "Apple Inc", 150.0, 25.4, 12.1);
        assert!(record.has_pe());
        assert!(record.has_ev_to_ebit());

        let negative = Record::new("LOSS", "Loss Corp", 3.0, -4.0, 0.0);
        assert!(!negative.has_pe());
        assert!(!negative.has_ev_to_ebit());
    }

    #[test]
    fn test_menu_choice_from_str() {
        assert_eq!("0".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!(" 3 ".parse::<MenuChoice>(), Ok(MenuChoice::EvEbitRanking));
        assert_eq!("5".parse::<MenuChoice>(), Ok(MenuChoice::Activity));
        assert!("6".parse::<MenuChoice>().is_err());
        assert!("one".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_menu_choice_keys_round_trip() {
        for choice in MenuChoice::ALL {
            assert_eq!(choice.key().to_string().parse::<MenuChoice>(), Ok(choice));
        }
    }

    #[test]
    fn test_activity_log_records_in_order() {
        let mut log = ActivityLog::start();
        assert!(log.is_empty());

        log.record("Search");
        log.record("P/E analysis");

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].action, "Search");
        assert_eq!(log.entries()[1].action, "P/E analysis");
        assert!(log.entries()[0].at >= log.started_at);
    }
}
