//! Main menu loop.
//!
//! A small state machine: wait for a choice, dispatch it, repeat until
//! the user picks Exit or input ends. The record list is only borrowed.

use crate::analysis::{self, RecommendRule};
use crate::config::Config;
use crate::models::{ActivityLog, MenuChoice, Record};
use crate::report;
use crate::terminal::{clear_screen, prompt};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// Where the loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    AwaitingChoice,
    Dispatching(MenuChoice),
    Exiting,
}

/// Settings the loop needs from the configuration.
#[derive(Debug, Clone)]
pub struct MenuSettings {
    pub rank_limit: usize,
    pub rule: RecommendRule,
    pub clear_screen: bool,
    pub pause_after_action: bool,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            rank_limit: 5,
            rule: RecommendRule::default(),
            clear_screen: true,
            pause_after_action: true,
        }
    }
}

impl From<&Config> for MenuSettings {
    fn from(config: &Config) -> Self {
        Self {
            rank_limit: config.screening.rank_limit,
            rule: config.recommend_rule(),
            clear_screen: config.display.clear_screen,
            pause_after_action: config.display.pause_after_action,
        }
    }
}

/// The interactive menu over a loaded record set.
pub struct Menu<'a> {
    records: &'a [Record],
    settings: MenuSettings,
    activity: ActivityLog,
}

impl<'a> Menu<'a> {
    /// Create a menu for a session that starts now.
    pub fn new(records: &'a [Record], settings: MenuSettings) -> Self {
        Self {
            records,
            settings,
            activity: ActivityLog::start(),
        }
    }

    /// Actions taken so far this session.
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Run until the user exits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        let mut state = MenuState::AwaitingChoice;

        loop {
            state = match state {
                MenuState::AwaitingChoice => self.await_choice(input, output)?,
                MenuState::Dispatching(choice) => self.dispatch(choice, input, output)?,
                MenuState::Exiting => break,
            };
        }

        debug!("Menu loop finished after {} actions", self.activity.len());
        Ok(())
    }

    fn await_choice<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<MenuState> {
        if self.settings.clear_screen {
            clear_screen(output)?;
        }

        let Some(line) = prompt(input, output, &report::generate_menu())? else {
            debug!("Input closed at menu prompt");
            return Ok(MenuState::Exiting);
        };

        let line = line.trim();
        if line.is_empty() {
            return Ok(MenuState::AwaitingChoice);
        }

        match line.parse::<MenuChoice>() {
            Ok(choice) => Ok(MenuState::Dispatching(choice)),
            Err(e) => {
                debug!("{}", e);
                writeln!(output, "Unknown option.")?;
                self.pause(input, output)
            }
        }
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        output: &mut W,
    ) -> Result<MenuState> {
        debug!("Dispatching {}", choice);

        let text = match choice {
            MenuChoice::Exit => {
                writeln!(output, "Goodbye!")?;
                output.flush()?;
                return Ok(MenuState::Exiting);
            }
            MenuChoice::Search => {
                let Some(query) =
                    prompt(input, output, "\nEnter search term (symbol or name): ")?
                else {
                    return Ok(MenuState::Exiting);
                };
                self.activity.record(format!("{} for {:?}", choice, query));
                let matches = analysis::search(self.records, &query);
                debug!("Search {:?} matched {} records", query, matches.len());
                report::generate_search_report(&matches)
            }
            MenuChoice::PeAnalysis => {
                self.activity.record(choice.to_string());
                report::generate_pe_report(self.records.len(), analysis::average_pe(self.records))
            }
            MenuChoice::EvEbitRanking => {
                self.activity.record(choice.to_string());
                let ranked = analysis::rank_by_ev_to_ebit(self.records, self.settings.rank_limit);
                report::generate_ranking_report(&ranked)
            }
            MenuChoice::Recommend => {
                self.activity.record(choice.to_string());
                let picks = analysis::recommend(self.records, &self.settings.rule);
                report::generate_recommendation_report(&picks, &self.settings.rule)
            }
            MenuChoice::Activity => {
                self.activity.record(choice.to_string());
                report::generate_activity_report(&self.activity)
            }
        };

        write!(output, "{}", text)?;
        self.pause(input, output)
    }

    /// Wait for Enter before going back to the menu.
    fn pause<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<MenuState> {
        if !self.settings.pause_after_action {
            output.flush()?;
            return Ok(MenuState::AwaitingChoice);
        }

        match prompt(input, output, "\nPress Enter to return to menu...")? {
            Some(_) => Ok(MenuState::AwaitingChoice),
            None => Ok(MenuState::Exiting),
        }
    }
}
