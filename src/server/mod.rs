//! HTTP API server.
//!
//! Routes one search endpoint per query kind plus report generation and
//! retrieval. Handlers translate request-shape violations into the
//! `{error}` envelope; provider failures never reach this layer.

mod handlers;
mod types;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::aggregator::Aggregator;
use crate::config::{Config, IMAGE_BODY_LIMIT, PROVIDER_TIMEOUT};
use crate::providers::Providers;
use crate::report::{ReportBuilder, ReportStore};

pub use types::{GeneratedReport, HealthResponse, SearchResult};

use handlers::{
    generate_report_handler, get_report_handler, health_handler, not_found_handler,
    search_email_handler, search_image_handler, search_name_handler, search_phone_handler,
    search_wifi_handler,
};

/// Shared state injected into every handler.
pub struct AppState {
    pub providers: Arc<Providers>,
    pub aggregator: Aggregator,
    pub report_builder: ReportBuilder,
    pub report_store: ReportStore,
}

/// Builds the API router over the shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/search/name", post(search_name_handler))
        .route(
            "/api/search/image",
            post(search_image_handler).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/api/search/phone/:number", get(search_phone_handler))
        .route("/api/search/email/:address", get(search_email_handler))
        .route("/api/search/wifi", post(search_wifi_handler))
        .route("/api/report/generate", post(generate_report_handler))
        .route("/api/report/:report_id", get(get_report_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Builds all shared resources and serves the API until shutdown.
///
/// # Errors
///
/// Returns an error if initialization fails or the listener cannot bind.
pub async fn run_server(config: Config) -> Result<(), anyhow::Error> {
    let providers = Arc::new(Providers::new(&config)?);
    let aggregator = Aggregator::new(providers.clone(), PROVIDER_TIMEOUT);
    let report_store = ReportStore::open(&config.reports_dir).await?;

    let state = Arc::new(AppState {
        providers,
        aggregator,
        report_builder: ReportBuilder::new(),
        report_store,
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {addr}: {e}"))?;

    log::info!("API server listening on http://{addr}/");
    if config.enable_wifi_scan {
        log::warn!("WiFi scanning is enabled; /api/search/wifi will run the platform scan utility");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {e}"))?;

    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    log::info!("Shutdown signal received, draining connections");
}
