//! Stock Tracker API Server
//!
//! HTTP gateway serving historical bars and live quote streams from Finnhub.

mod config;
mod routes;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use tracker_finnhub::FinnhubClient;
use tracker_services::{BarsService, MarketDataProvider, StreamConfig};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

/// How long to wait for streaming sessions to close after the server stops.
/// Covers one in-flight upstream call plus a write and a close.
const SESSION_DRAIN_TIMEOUT: Duration = Duration::from_secs(20);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream market data, shared read-only by every request and session
    pub provider: Arc<dyn MarketDataProvider>,
    pub bars_service: Arc<BarsService>,
    pub stream_config: Arc<StreamConfig>,
    /// Flips to `true` once the process starts shutting down
    pub shutdown: watch::Receiver<bool>,
    /// Live streaming sessions, drained on shutdown
    pub sessions: TaskTracker,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        stream_config: StreamConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            bars_service: Arc::new(BarsService::new(Arc::clone(&provider))),
            provider,
            stream_config: Arc::new(stream_config),
            shutdown,
            sessions: TaskTracker::new(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tracker_api=debug")),
        )
        .init();

    info!("Starting Stock Tracker API");

    let config = AppConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let finnhub = FinnhubClient::new(config.finnhub.clone())?;
    info!("Finnhub client ready at {}", finnhub.base_url());
    let provider: Arc<dyn MarketDataProvider> = Arc::new(finnhub);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let state = AppState::new(provider, config.stream.clone(), shutdown_rx);
    let sessions = state.sessions.clone();

    let app = routes::app(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    // Upgraded connections outlive `serve`; let their sessions send the close frame
    sessions.close();
    info!("Waiting for {} streaming session(s) to close", sessions.len());
    if tokio::time::timeout(SESSION_DRAIN_TIMEOUT, sessions.wait())
        .await
        .is_err()
    {
        warn!(
            "{} streaming session(s) still open after {:?}",
            sessions.len(),
            SESSION_DRAIN_TIMEOUT
        );
    }

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM, then tell every streaming session to stop
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating shutdown"),
        () = terminate => info!("Received SIGTERM, initiating shutdown"),
    }

    let _ = shutdown_tx.send(true);
}
