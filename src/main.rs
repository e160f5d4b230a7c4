//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `osint_aggregator` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use osint_aggregator::initialization::init_logger_with;
use osint_aggregator::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting GOOGLE_MAPS_API_KEY in .env without exporting it manually
    let _ = dotenvy::dotenv();

    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run_server(config).await {
        eprintln!("osint_aggregator error: {:#}", e);
        process::exit(1);
    }

    Ok(())
}
