//! Bars query service
//!
//! Validates `/api/candles` parameters, fetches bars from the provider and
//! shapes them into the client-facing envelope.

use serde::Serialize;
use std::sync::Arc;
use tracker_core::{
    BarSeries, BarStatus, Symbol, TrackerError, TrackerResult, DEFAULT_WINDOW_MINUTES,
    MAX_WINDOW_MINUTES,
};
use tracing::debug;

use crate::MarketDataProvider;

/// Effective window for a raw `minutes` parameter
///
/// Best effort: anything that is not an integer in `[1, MAX_WINDOW_MINUTES]`
/// silently becomes `DEFAULT_WINDOW_MINUTES` instead of failing the request.
pub fn parse_window_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|m| (1..=MAX_WINDOW_MINUTES).contains(m))
        .unwrap_or(DEFAULT_WINDOW_MINUTES)
}

/// Response body for `/api/candles`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CandlesResponse {
    /// Bars as parallel sequences
    Series {
        symbol: Symbol,
        status: BarStatus,
        t: Vec<i64>,
        o: Vec<f64>,
        h: Vec<f64>,
        l: Vec<f64>,
        c: Vec<f64>,
        v: Vec<f64>,
    },
    /// Nothing to chart; `candles` is always an empty array
    Empty {
        symbol: Symbol,
        status: BarStatus,
        candles: Vec<serde_json::Value>,
    },
}

impl From<BarSeries> for CandlesResponse {
    fn from(series: BarSeries) -> Self {
        if series.is_empty() {
            return CandlesResponse::Empty {
                symbol: series.symbol,
                status: series.status,
                candles: Vec::new(),
            };
        }

        CandlesResponse::Series {
            symbol: series.symbol,
            status: series.status,
            t: series.timestamps,
            o: series.open,
            h: series.high,
            l: series.low,
            c: series.close,
            v: series.volume,
        }
    }
}

/// Service answering historical bars queries
#[derive(Clone)]
pub struct BarsService {
    provider: Arc<dyn MarketDataProvider>,
}

impl BarsService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Answer a bars query
    ///
    /// A missing or empty symbol fails with `InvalidArgument` before the
    /// provider is touched. Provider failures are returned as-is; the caller
    /// logs them and decides how much a client gets to see.
    pub async fn query(
        &self,
        symbol: Option<&str>,
        minutes: Option<&str>,
    ) -> TrackerResult<CandlesResponse> {
        let symbol = match symbol {
            Some(s) if !s.is_empty() => Symbol::from(s),
            _ => return Err(TrackerError::invalid_argument("symbol is required")),
        };

        let window = parse_window_minutes(minutes);
        debug!("Querying {} minutes of bars for {}", window, symbol);

        let series = self.provider.get_bars(&symbol, window).await?;

        Ok(CandlesResponse::from(series))
    }
}
