//! osint_aggregator library: query aggregation and report assembly.
//!
//! This library fans a single person-lookup query out to independent OSINT
//! providers (social profiles, email, phone, address, reverse-image links,
//! local WiFi scans), merges the partial results into one response envelope,
//! and derives summarized reports from arbitrary result bundles.
//!
//! # Example
//!
//! ```no_run
//! use osint_aggregator::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

mod aggregator;
pub mod config;
mod error_handling;
pub mod initialization;
mod providers;
mod report;
mod server;
mod utils;

// Re-export public API
pub use aggregator::{Aggregator, NameSearchResults, SearchOptions};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::ApiError;
pub use providers::Providers;
pub use report::{Finding, FindingKind, Report, ReportBuilder, ReportStore, Severity, Summary};
pub use server::{build_router, run_server, AppState, GeneratedReport, SearchResult};
