//! HTTP response envelopes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::report::Report;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        HealthResponse {
            status: "healthy",
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Envelope for one query execution.
///
/// A fresh `search_id` is generated per request; identical queries are
/// never deduplicated. The WiFi endpoint sets no `query`.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub search_id: Uuid,
    pub results: Value,
}

impl SearchResult {
    pub fn new(query: Option<String>, results: Value) -> Self {
        SearchResult {
            query,
            timestamp: Utc::now(),
            search_id: Uuid::new_v4(),
            results,
        }
    }
}

/// Response for a freshly generated report.
#[derive(Debug, Serialize)]
pub struct GeneratedReport {
    pub report_id: Uuid,
    pub report: Report,
}
