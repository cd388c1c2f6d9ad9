//! Quote streaming session
//!
//! Drives one upgraded connection through `Connecting -> Active -> Closed`:
//! an immediate first quote, then one fetch-and-send per poll interval. Any
//! fetch or send failure closes the connection; nothing is retried.

use futures_util::{Sink, SinkExt};
use std::fmt;
use std::future::Future;
use std::pin::{pin, Pin};
use std::sync::Arc;
use tokio::time::{sleep_until, timeout, Instant};
use tracker_core::{QuoteMessage, Symbol, TrackerError};
use tracing::{debug, info, warn};

use super::StreamConfig;
use crate::MarketDataProvider;

/// Lifecycle of a streaming session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, first quote not yet attempted
    Connecting,
    /// Pushing quotes
    Active,
    /// Connection closed; terminal
    Closed,
}

/// External reasons to stop a session between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// The client closed its side of the connection
    ClientClosed,
    /// The process is shutting down
    Shutdown,
}

/// Why a session ended
#[derive(Debug)]
pub enum CloseReason {
    ClientClosed,
    Shutdown,
    /// The upstream quote fetch failed
    FetchFailed(TrackerError),
    /// Writing to the connection failed or missed its deadline
    SendFailed(TrackerError),
}

impl CloseReason {
    pub fn is_failure(&self) -> bool {
        matches!(self, CloseReason::FetchFailed(_) | CloseReason::SendFailed(_))
    }
}

impl From<StopSignal> for CloseReason {
    fn from(signal: StopSignal) -> Self {
        match signal {
            StopSignal::ClientClosed => CloseReason::ClientClosed,
            StopSignal::Shutdown => CloseReason::Shutdown,
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::ClientClosed => write!(f, "client closed the connection"),
            CloseReason::Shutdown => write!(f, "server shutting down"),
            CloseReason::FetchFailed(e) => write!(f, "quote fetch failed: {}", e),
            CloseReason::SendFailed(e) => write!(f, "send failed: {}", e),
        }
    }
}

/// Outcome of a finished session
#[derive(Debug)]
pub struct SessionSummary {
    pub symbol: Symbol,
    pub messages_sent: u64,
    pub reason: CloseReason,
}

/// A single client's live quote stream
///
/// Ticks never overlap: the wait for the next tick starts only after the
/// previous fetch and send have finished, so consecutive messages are at
/// least `poll_interval` apart.
pub struct QuoteSession<P: ?Sized = dyn MarketDataProvider> {
    provider: Arc<P>,
    symbol: Symbol,
    config: StreamConfig,
    state: SessionState,
    messages_sent: u64,
}

impl<P> QuoteSession<P>
where
    P: MarketDataProvider + ?Sized,
{
    pub fn new(provider: Arc<P>, symbol: Symbol, config: StreamConfig) -> Self {
        Self {
            provider,
            symbol,
            config,
            state: SessionState::Connecting,
            messages_sent: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Run the session to completion over `sink`
    ///
    /// `stop` resolves when the session should end for a reason other than
    /// a failure (client gone, shutdown). It is only observed while waiting
    /// for the next tick; an in-flight fetch and send always finish first.
    /// The sink is closed exactly once before this returns.
    pub async fn run<S, F>(mut self, sink: S, stop: F) -> SessionSummary
    where
        S: Sink<String>,
        S::Error: fmt::Display,
        F: Future<Output = StopSignal>,
    {
        let mut sink = pin!(sink);
        let mut stop = pin!(stop);

        self.transition(SessionState::Active);

        let reason = match self.tick(&mut sink).await {
            Err(reason) => reason,
            Ok(()) => loop {
                let wake_at = Instant::now() + self.config.poll_interval;

                tokio::select! {
                    biased;
                    signal = &mut stop => break CloseReason::from(signal),
                    () = sleep_until(wake_at) => {}
                }

                if let Err(reason) = self.tick(&mut sink).await {
                    break reason;
                }
            },
        };

        self.close(sink, &reason).await;

        SessionSummary {
            symbol: self.symbol,
            messages_sent: self.messages_sent,
            reason,
        }
    }

    /// One fetch-and-send cycle
    async fn tick<S>(&mut self, sink: &mut Pin<&mut S>) -> Result<(), CloseReason>
    where
        S: Sink<String>,
        S::Error: fmt::Display,
    {
        let quote = self
            .provider
            .get_quote(&self.symbol)
            .await
            .map_err(CloseReason::FetchFailed)?;

        let payload = serde_json::to_string(&QuoteMessage::from(&quote)).map_err(|e| {
            CloseReason::SendFailed(TrackerError::internal(format!(
                "Failed to serialize quote: {}",
                e
            )))
        })?;

        match timeout(self.config.write_timeout, sink.send(payload)).await {
            Ok(Ok(())) => {
                self.messages_sent += 1;
                debug!(
                    "Pushed {} @ {} (message #{})",
                    self.symbol, quote.price, self.messages_sent
                );
                Ok(())
            }
            Ok(Err(e)) => Err(CloseReason::SendFailed(TrackerError::connection(
                e.to_string(),
            ))),
            Err(_) => Err(CloseReason::SendFailed(TrackerError::connection(format!(
                "write deadline of {:?} exceeded",
                self.config.write_timeout
            )))),
        }
    }

    async fn close<S>(&mut self, mut sink: Pin<&mut S>, reason: &CloseReason)
    where
        S: Sink<String>,
        S::Error: fmt::Display,
    {
        if reason.is_failure() {
            warn!("Closing {} stream: {}", self.symbol, reason);
        } else {
            info!("Closing {} stream: {}", self.symbol, reason);
        }

        match timeout(self.config.write_timeout, sink.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("Error closing {} stream: {}", self.symbol, e),
            Err(_) => debug!("Timed out closing {} stream", self.symbol),
        }

        self.transition(SessionState::Closed);
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session {}: {:?} -> {:?}", self.symbol, self.state, next);
        self.state = next;
    }
}
