//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_REPORTS_DIR, DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        })
    }
}

/// Application configuration.
///
/// Parsed from the command line in the binary; can also be constructed
/// programmatically when embedding the server.
///
/// # Examples
///
/// ```no_run
/// use osint_aggregator::Config;
///
/// let config = Config {
///     port: 8080,
///     enable_wifi_scan: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "osint_aggregator", version, about)]
pub struct Config {
    /// Port to listen on (also honors the PORT environment variable)
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Address to bind the listener to
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout for outbound provider HTTP calls, in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value for outbound provider requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Directory where generated reports are persisted
    #[arg(long, default_value = DEFAULT_REPORTS_DIR)]
    pub reports_dir: PathBuf,

    /// Allow the WiFi scan endpoint to invoke the platform scan utility.
    ///
    /// WiFi scanning runs an external OS command; it stays disabled unless
    /// explicitly authorized here.
    #[arg(long, default_value_t = false)]
    pub enable_wifi_scan: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind: "0.0.0.0".to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            enable_wifi_scan: false,
        }
    }
}
