//! Deadline Countdown - polls a remote deadline and counts it down locally
//!
//! This is the main entry point for the deadline-countdown daemon.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use deadline_countdown::{
    api::create_router,
    config::Config,
    services::{DeadlineFetcher, HttpFetcher, MockFetcher},
    state::{AppState, CountdownEngine},
    tasks::CountdownSession,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("deadline_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting deadline-countdown v{}", env!("CARGO_PKG_VERSION"));

    let fetcher: Arc<dyn DeadlineFetcher> = if config.mock {
        info!(
            "Using simulated backend: {}s left, failure rate {}",
            config.mock_seconds, config.mock_failure_rate
        );
        Arc::new(
            MockFetcher::new(config.mock_seconds)
                .with_delay(config.mock_delay())
                .with_failure_rate(config.mock_failure_rate),
        )
    } else {
        info!("Polling deadline from {}", config.url);
        Arc::new(HttpFetcher::new(config.url.clone()))
    };

    let engine = Arc::new(CountdownEngine::new(fetcher, config.retry_policy()));
    let session = CountdownSession::start(&engine, &config.session_config());

    let state = Arc::new(AppState::new(Arc::clone(&engine), config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Status API running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status  - Countdown state and formatting");
    info!("  POST /refresh - Refresh the deadline now");
    info!("  GET  /metrics - Recorded operation timings");
    info!("  GET  /health  - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    session.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}
