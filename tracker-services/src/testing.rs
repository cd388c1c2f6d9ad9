//! Scripted provider shared by the service tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracker_core::{BarSeries, Quote, Symbol, TrackerError, TrackerResult};

use crate::MarketDataProvider;

/// Provider whose quote calls succeed until a configured call number
pub struct MockProvider {
    quote_calls: AtomicUsize,
    bars_calls: AtomicUsize,
    /// 1-based quote call that fails, and every call after it
    fail_quote_from: Option<usize>,
    bars: Mutex<Option<TrackerResult<BarSeries>>>,
    last_window: Mutex<Option<i64>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            quote_calls: AtomicUsize::new(0),
            bars_calls: AtomicUsize::new(0),
            fail_quote_from: None,
            bars: Mutex::new(None),
            last_window: Mutex::new(None),
        }
    }

    pub fn failing_quotes_from(call: usize) -> Self {
        Self {
            fail_quote_from: Some(call),
            ..Self::new()
        }
    }

    pub fn with_bars(bars: TrackerResult<BarSeries>) -> Self {
        let provider = Self::new();
        *provider.bars.lock().unwrap() = Some(bars);
        provider
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn bars_calls(&self) -> usize {
        self.bars_calls.load(Ordering::SeqCst)
    }

    pub fn last_window(&self) -> Option<i64> {
        *self.last_window.lock().unwrap()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn get_quote(&self, symbol: &Symbol) -> TrackerResult<Quote> {
        let call = self.quote_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.fail_quote_from {
            Some(from) if call >= from => Err(TrackerError::api(503, "upstream unavailable")),
            _ => Ok(Quote::observed_now(symbol.clone(), 100.0 + call as f64)),
        }
    }

    async fn get_bars(&self, symbol: &Symbol, window_minutes: i64) -> TrackerResult<BarSeries> {
        self.bars_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_window.lock().unwrap() = Some(window_minutes);
        match self.bars.lock().unwrap().take() {
            Some(result) => result,
            None => Ok(BarSeries::no_data(symbol.clone())),
        }
    }
}
