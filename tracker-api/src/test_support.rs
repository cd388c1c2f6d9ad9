//! Stub provider and state builders for route tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracker_core::{BarSeries, Quote, Symbol, TrackerError, TrackerResult};
use tracker_services::{MarketDataProvider, StreamConfig};

use crate::AppState;

/// Provider returning canned bars and incrementing quote prices
#[derive(Default)]
pub struct StubProvider {
    bars: Mutex<Option<TrackerResult<BarSeries>>>,
    fail_quotes: bool,
    quote_calls: AtomicUsize,
    bars_calls: AtomicUsize,
}

impl StubProvider {
    pub fn with_bars(bars: TrackerResult<BarSeries>) -> Self {
        Self {
            bars: Mutex::new(Some(bars)),
            ..Self::default()
        }
    }

    pub fn failing_quotes() -> Self {
        Self {
            fail_quotes: true,
            ..Self::default()
        }
    }

    pub fn bars_calls(&self) -> usize {
        self.bars_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn get_quote(&self, symbol: &Symbol) -> TrackerResult<Quote> {
        let call = self.quote_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_quotes {
            return Err(TrackerError::network("connection refused"));
        }
        Ok(Quote::observed_now(symbol.clone(), 200.0 + call as f64))
    }

    async fn get_bars(&self, symbol: &Symbol, _window_minutes: i64) -> TrackerResult<BarSeries> {
        self.bars_calls.fetch_add(1, Ordering::SeqCst);
        let canned = self.bars.lock().unwrap().take();
        canned.unwrap_or_else(|| Ok(BarSeries::no_data(symbol.clone())))
    }
}

/// Build app state around `provider`; keep the sender alive for the test
pub fn test_state(
    provider: Arc<dyn MarketDataProvider>,
    stream_config: StreamConfig,
) -> (AppState, watch::Sender<bool>) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    (AppState::new(provider, stream_config, shutdown_rx), shutdown_tx)
}
