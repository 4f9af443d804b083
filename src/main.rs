//! Tradable - terminal stock screener
//!
//! Loads a comma-separated stock table, gates the session behind a demo
//! login, and serves read-only screening reports from a numbered menu.
//!
//! Exit codes:
//!   0 - Normal exit, or login attempts exhausted
//!   1 - Runtime error (invalid arguments or config, unreadable data file, I/O)

mod analysis;
mod auth;
mod cli;
mod config;
mod loader;
mod menu;
mod models;
mod report;
mod terminal;

use anyhow::{Context, Result};
use auth::{FixedCredentials, GateConfig, SessionGate};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use menu::{Menu, MenuSettings};
use std::io::{self, IsTerminal, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("Tradable v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Session failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .tradable.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml()?;
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change the data file, thresholds, and display options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so they never interleave with report text on stdout.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load data, log in, and run the menu.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let records = loader::load_records(&config.general.data_file)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    writeln!(output, "Welcome to Tradable")?;

    let gate = SessionGate::new(FixedCredentials, GateConfig::from(&config.session));
    if !gate.run(&mut input, &mut output)? {
        info!("Login attempts exhausted");
        return Ok(());
    }

    let mut settings = MenuSettings::from(&config);
    if settings.clear_screen && !output.is_terminal() {
        debug!("stdout is not a terminal, not clearing the screen");
        settings.clear_screen = false;
    }

    let mut menu = Menu::new(&records, settings);
    menu.run(&mut input, &mut output)?;

    info!("Session ended after {} actions", menu.activity().len());
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
