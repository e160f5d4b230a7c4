//! Shared test helpers: spin up the API server on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use osint_aggregator::config::PROVIDER_TIMEOUT;
use osint_aggregator::{build_router, Aggregator, AppState, Config, Providers, ReportBuilder, ReportStore};

/// A running API server plus the scratch state backing it.
///
/// The server task is aborted and the reports directory removed on drop.
pub struct TestServer {
    pub base_url: String,
    server: tokio::task::JoinHandle<()>,
    _reports_dir: tempfile::TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Starts a server with default configuration (WiFi gate off, no geocoding
/// credential assumed) against a temp reports directory.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(Config::default(), PROVIDER_TIMEOUT).await
}

/// Starts a server with the given config and per-provider timeout.
pub async fn spawn_server_with(config: Config, provider_timeout: Duration) -> TestServer {
    let reports_dir = tempfile::tempdir().expect("temp reports dir");

    let providers = Arc::new(Providers::new(&config).expect("providers build"));
    let state = Arc::new(AppState {
        aggregator: Aggregator::new(providers.clone(), provider_timeout),
        providers,
        report_builder: ReportBuilder::new(),
        report_store: ReportStore::open(reports_dir.path())
            .await
            .expect("report store opens"),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port binds");
    let addr = listener.local_addr().expect("local addr");

    let app = build_router(state);
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server runs");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        server,
        _reports_dir: reports_dir,
    }
}
