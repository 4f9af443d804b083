//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.tradable.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".tradable.toml";

/// Upper bound on login attempts; the file may lower it, never raise it.
pub const MAX_LOGIN_ATTEMPTS: usize = 3;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Login settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Screening thresholds.
    #[serde(default)]
    pub screening: ScreeningConfig,

    /// Terminal presentation.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Path to the stock table.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.csv")
}

/// Login prompt settings. Credentials are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Attempts before the program gives up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Pause after a successful login, in milliseconds.
    #[serde(default = "default_success_delay")]
    pub success_delay_ms: u64,

    /// Pause after a failed login, in milliseconds.
    #[serde(default = "default_failure_delay")]
    pub failure_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            success_delay_ms: default_success_delay(),
            failure_delay_ms: default_failure_delay(),
        }
    }
}

fn default_max_attempts() -> usize {
    MAX_LOGIN_ATTEMPTS
}

fn default_success_delay() -> u64 {
    500
}

fn default_failure_delay() -> u64 {
    700
}

/// Screening thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// How many entries the EV/EBIT ranking shows.
    #[serde(default = "default_rank_limit")]
    pub rank_limit: usize,

    /// Recommendation: P/E must be below this.
    #[serde(default = "default_max_pe")]
    pub max_pe: f64,

    /// Recommendation: EV/EBIT must be below this.
    #[serde(default = "default_max_ev_to_ebit")]
    pub max_ev_to_ebit: f64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            rank_limit: default_rank_limit(),
            max_pe: default_max_pe(),
            max_ev_to_ebit: default_max_ev_to_ebit(),
        }
    }
}

fn default_rank_limit() -> usize {
    5
}

fn default_max_pe() -> f64 {
    15.0
}

fn default_max_ev_to_ebit() -> f64 {
    8.0
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Clear the screen before showing the menu.
    #[serde(default = "default_true")]
    pub clear_screen: bool,

    /// Wait for Enter after each action.
    #[serde(default = "default_true")]
    pub pause_after_action: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            pause_after_action: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values that would make the program misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.session.max_attempts == 0 {
            bail!("session.max_attempts must be at least 1");
        }
        if self.session.max_attempts > MAX_LOGIN_ATTEMPTS {
            bail!(
                "session.max_attempts must be at most {}",
                MAX_LOGIN_ATTEMPTS
            );
        }
        if self.screening.rank_limit == 0 {
            bail!("screening.rank_limit must be at least 1");
        }
        if !(self.screening.max_pe.is_finite() && self.screening.max_pe > 0.0) {
            bail!("screening.max_pe must be a positive number");
        }
        if !(self.screening.max_ev_to_ebit.is_finite() && self.screening.max_ev_to_ebit > 0.0) {
            bail!("screening.max_ev_to_ebit must be a positive number");
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.general.data_file = data.clone();
        }

        if args.no_delay {
            self.session.success_delay_ms = 0;
            self.session.failure_delay_ms = 0;
        }

        if args.no_clear {
            self.display.clear_screen = false;
        }
    }

    /// Recommendation rule built from the screening thresholds.
    pub fn recommend_rule(&self) -> crate::analysis::RecommendRule {
        crate::analysis::RecommendRule {
            max_pe: self.screening.max_pe,
            max_ev_to_ebit: self.screening.max_ev_to_ebit,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        let config = Config::default();
        toml::to_string_pretty(&config).context("Failed to serialize default config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.data_file, PathBuf::from("data.csv"));
        assert_eq!(config.session.max_attempts, 3);
        assert_eq!(config.screening.rank_limit, 5);
        assert_eq!(config.screening.max_pe, 15.0);
        assert_eq!(config.screening.max_ev_to_ebit, 8.0);
        assert!(config.display.clear_screen);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
data_file = "stocks/nasdaq.csv"

[session]
failure_delay_ms = 0

[screening]
rank_limit = 10
max_pe = 12.5
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.data_file, PathBuf::from("stocks/nasdaq.csv"));
        assert_eq!(config.session.failure_delay_ms, 0);
        assert_eq!(config.session.success_delay_ms, 500);
        assert_eq!(config.screening.rank_limit, 10);
        assert_eq!(config.screening.max_pe, 12.5);
        assert_eq!(config.screening.max_ev_to_ebit, 8.0);
        assert!(config.display.pause_after_action);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nmax_attempts = 0").unwrap();
        assert!(Config::load(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[screening]\nmax_pe = -1.0").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_too_many_attempts() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nmax_attempts = 4").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("at most 3"));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nmax_attempts = 2").unwrap();
        assert_eq!(Config::load(file.path()).unwrap().session.max_attempts, 2);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[screening]\nrank_limit = \"five\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = Args {
            data: Some(PathBuf::from("other.csv")),
            config: None,
            verbose: false,
            quiet: false,
            no_delay: true,
            no_clear: true,
            init_config: false,
        };

        config.merge_with_args(&args);

        assert_eq!(config.general.data_file, PathBuf::from("other.csv"));
        assert_eq!(config.session.success_delay_ms, 0);
        assert_eq!(config.session.failure_delay_ms, 0);
        assert!(!config.display.clear_screen);
        assert!(config.display.pause_after_action);
    }

    #[test]
    fn test_merge_keeps_file_values_without_flags() {
        let mut config = Config::default();
        config.general.data_file = PathBuf::from("from_file.csv");
        let args = Args {
            data: None,
            config: None,
            verbose: false,
            quiet: false,
            no_delay: false,
            no_clear: false,
            init_config: false,
        };

        config.merge_with_args(&args);

        assert_eq!(config.general.data_file, PathBuf::from("from_file.csv"));
        assert_eq!(config.session.failure_delay_ms, 700);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml().unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[session]"));
        assert!(toml_str.contains("[screening]"));
        assert!(toml_str.contains("[display]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.screening.rank_limit, 5);
    }
}
