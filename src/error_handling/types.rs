//! Error type definitions.
//!
//! This module defines the initialization errors and the request-level error
//! taxonomy used by the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error preparing the reports directory.
    #[error("Reports directory error: {0}")]
    ReportsDirError(String),
}

/// Request-level error taxonomy.
///
/// Only request-shape violations and truly unexpected faults reach this type;
/// provider failures are folded into provider records and never abort a
/// request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request input (bad name, file type, etc.).
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown report id or route.
    #[error("{0}")]
    NotFound(String),

    /// Uploaded payload exceeds the configured ceiling.
    #[error("File too large")]
    PayloadTooLarge,

    /// Anything uncaught. The detail is logged; the response stays generic.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Never leak internal detail to the caller
            ApiError::Internal(e) => {
                log::error!("Unhandled failure: {e:#}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status_code(),
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("secret database path"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
