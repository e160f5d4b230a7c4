//! Report handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error_handling::ApiError;
use crate::report::Report;
use crate::server::types::GeneratedReport;
use crate::server::AppState;

/// `POST /api/report/generate` - builds and persists a report.
///
/// The body's `search_results` may be any previously returned bundle (or
/// nothing at all); the builder tolerates every shape.
pub async fn generate_report_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Result<Json<GeneratedReport>, ApiError> {
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);
    let search_results = body
        .get("search_results")
        .cloned()
        .unwrap_or_else(|| json!({}));

    let report_id = Uuid::new_v4();
    let report = state.report_builder.build(search_results, report_id);
    state.report_store.save(&report).await?;

    Ok(Json(GeneratedReport { report_id, report }))
}

/// `GET /api/report/{report_id}` - fetches a stored report.
pub async fn get_report_handler(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    match state.report_store.load(&report_id).await? {
        Some(report) => Ok(Json(report)),
        None => Err(ApiError::NotFound("Report not found".to_string())),
    }
}
