//! WebSocket route handler
//!
//! Upgrades `/ws?symbol=...` and hands the connection to a quote session.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{future, stream::SplitStream, SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracker_core::Symbol;
use tracker_services::{QuoteSession, StopSignal};
use tracing::{info, warn};

use crate::AppState;

/// Query parameters for the quote stream
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Symbol to stream (defaults to the configured default symbol)
    pub symbol: Option<String>,
}

/// Create WebSocket routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}

/// WebSocket upgrade handler
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<StreamQuery>,
) -> impl IntoResponse {
    let symbol = state.stream_config.resolve_symbol(params.symbol.as_deref());
    info!("WebSocket upgrade request received for {}", symbol);

    ws.on_failed_upgrade(|e: axum::Error| warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| {
            let sessions = state.sessions.clone();
            sessions.track_future(handle_socket(socket, symbol, state))
        })
}

/// Run one quote session over an established WebSocket connection
async fn handle_socket(socket: WebSocket, symbol: Symbol, state: AppState) {
    let (sender, receiver) = socket.split();

    let sink = sender.with(|text: String| {
        future::ready(Ok::<_, axum::Error>(Message::Text(text.into())))
    });
    let stop = stop_signal(receiver, state.shutdown.clone());

    let session = QuoteSession::new(
        Arc::clone(&state.provider),
        symbol,
        state.stream_config.as_ref().clone(),
    );
    let summary = session.run(sink, stop).await;

    info!(
        "WebSocket stream for {} closed after {} message(s): {}",
        summary.symbol, summary.messages_sent, summary.reason
    );
}

/// Resolve once the client goes away or the server starts shutting down
///
/// Inbound messages carry no meaning on this stream and are discarded.
async fn stop_signal(
    mut receiver: SplitStream<WebSocket>,
    mut shutdown: watch::Receiver<bool>,
) -> StopSignal {
    let client_gone = async {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    };

    let shutdown_requested = async {
        let signalled = shutdown.wait_for(|stopping| *stopping).await.is_ok();
        if !signalled {
            // Sender dropped without signalling; only the client can end us now
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = client_gone => StopSignal::ClientClosed,
        () = shutdown_requested => StopSignal::Shutdown,
    }
}
