//! Search handlers.
//!
//! Each handler validates request shape, runs the relevant provider(s), and
//! wraps the outcome in a fresh `SearchResult` envelope. Provider failures
//! are already folded into the provider records by the time results get
//! here; only request-shape violations produce error responses.

use std::io::Write;
use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::Value;

use crate::aggregator::SearchOptions;
use crate::config::{ALLOWED_IMAGE_EXTENSIONS, MAX_IMAGE_SIZE};
use crate::error_handling::ApiError;
use crate::server::types::SearchResult;
use crate::server::AppState;
use crate::utils::sanitize_filename;

/// `POST /api/search/name` - aggregated lookup across enabled categories.
pub async fn search_name_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Result<Json<SearchResult>, ApiError> {
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    let name = body
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Name is required".to_string()))?
        .to_string();

    // Wrong-typed options fall back to the default (everything enabled)
    let options = body
        .get("options")
        .map(|value| serde_json::from_value::<SearchOptions>(value.clone()).unwrap_or_default())
        .unwrap_or_default();

    let results = state.aggregator.aggregate(&name, &options).await;
    let results = serde_json::to_value(results).map_err(anyhow::Error::from)?;

    Ok(Json(SearchResult::new(Some(name), results)))
}

/// `POST /api/search/image` - reverse image search stubs.
///
/// The upload is validated (field present, filename, extension, size) and
/// spooled into a request-scoped temp file; the file is deleted on every
/// exit path and its bytes are never sent anywhere.
pub async fn search_image_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SearchResult>, ApiError> {
    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::InvalidInput("No file selected".to_string()));
        }
        if !has_allowed_extension(&filename) {
            return Err(ApiError::InvalidInput("Invalid file type".to_string()));
        }
        let filename = sanitize_filename(&filename);

        // Scoped acquisition: dropping the spool deletes the upload on
        // every exit path, including validation failures below
        let mut spool = tempfile::NamedTempFile::new().map_err(anyhow::Error::from)?;
        let mut written = 0usize;
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            written += chunk.len();
            if written > MAX_IMAGE_SIZE {
                return Err(ApiError::PayloadTooLarge);
            }
            spool.write_all(&chunk).map_err(anyhow::Error::from)?;
        }

        let results = state.providers.image.reverse_search(spool.path());
        let results = serde_json::to_value(results).map_err(anyhow::Error::from)?;
        return Ok(Json(SearchResult::new(Some(filename), results)));
    }

    Err(ApiError::InvalidInput("No image file provided".to_string()))
}

/// `GET /api/search/phone/{number}` - numbering-plan lookup.
pub async fn search_phone_handler(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<SearchResult>, ApiError> {
    let record = state.providers.phone.lookup(&number);
    let results = serde_json::to_value(record).map_err(anyhow::Error::from)?;
    Ok(Json(SearchResult::new(Some(number), results)))
}

/// `GET /api/search/email/{address}` - email format and domain lookup.
pub async fn search_email_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<SearchResult>, ApiError> {
    let record = state.providers.email.lookup(&address).await;
    let results = serde_json::to_value(record).map_err(anyhow::Error::from)?;
    Ok(Json(SearchResult::new(Some(address), results)))
}

/// `POST /api/search/wifi` - gated local network scan.
///
/// The envelope carries no `query`; the optional body only supplies a
/// location label echoed back in the scan record.
pub async fn search_wifi_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Result<Json<SearchResult>, ApiError> {
    let location = body
        .as_ref()
        .and_then(|Json(value)| value.get("location"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let record = state.providers.wifi.scan(location).await;
    let results = serde_json::to_value(record).map_err(anyhow::Error::from)?;
    Ok(Json(SearchResult::new(None, results)))
}

/// Checks the filename extension against the allowed image types.
fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(stem, extension)| {
            !stem.is_empty() && ALLOWED_IMAGE_EXTENSIONS.contains(&extension.to_lowercase().as_str())
        })
        .unwrap_or(false)
}

/// Maps multipart decode failures onto the error taxonomy.
///
/// The body-limit breach is the one case that must become a 413; everything
/// else about a broken multipart payload is the caller's input.
fn multipart_error(e: MultipartError) -> ApiError {
    let message = e.to_string();
    if message.to_lowercase().contains("length limit") {
        ApiError::PayloadTooLarge
    } else {
        ApiError::InvalidInput(format!("Invalid multipart payload: {message}"))
    }
}
