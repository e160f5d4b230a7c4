//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including timeouts, size limits, and other operational
//! parameters.

use std::time::Duration;

/// Per-provider lookup timeout.
///
/// Each provider makes at most a handful of outbound calls, each capped at
/// `HTTP_TIMEOUT_SECS`; 15s bounds the whole category so one unreachable
/// provider cannot stall the aggregate.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(15);

/// Outbound HTTP request timeout in seconds (per call).
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// DNS query timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Timeout for the platform WiFi scan command.
pub const WIFI_SCAN_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of WiFi networks returned per scan.
pub const WIFI_NETWORK_LIMIT: usize = 10;

/// Maximum accepted image upload size in bytes (10MB).
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Request body ceiling for the image upload route.
///
/// Slightly above `MAX_IMAGE_SIZE` so multipart framing overhead does not
/// reject a file that is itself within the limit; the per-file check in the
/// handler enforces the real ceiling.
pub const IMAGE_BODY_LIMIT: usize = MAX_IMAGE_SIZE + 1024 * 1024;

/// File extensions accepted for image uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Maximum number of GitHub user matches kept per search.
pub const GITHUB_RESULT_LIMIT: usize = 5;

/// Maximum number of geocoding candidates kept per address search.
pub const GEOCODE_RESULT_LIMIT: usize = 5;

/// Maximum length of a soft-error message embedded in a provider record.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

/// Default directory for persisted reports.
pub const DEFAULT_REPORTS_DIR: &str = "./reports";

/// Default User-Agent string for outbound provider requests.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
