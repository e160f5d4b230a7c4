//! HTTP client initialization.
//!
//! This module provides functions to initialize HTTP clients with proper
//! configuration for provider requests and profile existence probes.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client used for provider API calls.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Per-request timeout from the configuration
/// - Redirect following enabled (reqwest default)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for profile existence probes.
///
/// Creates a `reqwest::Client` with redirects disabled. Profile probes treat
/// a redirect as "not found": platforms redirect unknown handles to login or
/// search pages, so only a direct 200 counts as a hit.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
