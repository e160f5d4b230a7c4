//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver used for mail-exchanger lookups.
///
/// Creates a DNS resolver using default configuration with short timeouts so
/// a slow or unresponsive DNS server cannot hold up an email lookup.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // ndots = 0 prevents search-domain appending on bare domains
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
