//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Tradable - terminal stock screener
///
/// Loads a comma-separated stock table, asks for a login, then offers
/// search, P/E, EV/EBIT and recommendation reports from a menu.
///
/// Data file format (no header):
///   symbol,name,price,pe_ratio,ev_to_ebit
///
/// Examples:
///   tradable
///   tradable --data stocks.csv --no-delay
///   tradable --config ./screener.toml --verbose
///   tradable --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Stock table to load
    ///
    /// Overrides general.data_file from the config. Defaults to data.csv.
    /// A missing file is not an error; the menu works with no records.
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .tradable.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip the pause after each login attempt
    #[arg(long)]
    pub no_delay: bool,

    /// Never clear the screen before the menu
    #[arg(long)]
    pub no_clear: bool,

    /// Write a default .tradable.toml to the current directory and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        if let Some(ref data) = self.data {
            if data.is_dir() {
                return Err(format!("Data path is a directory: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
