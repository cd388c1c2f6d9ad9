//! Market data provider seam
//!
//! Services depend on this trait rather than on the Finnhub client directly
//! so sessions and handlers can run against scripted providers in tests.

use async_trait::async_trait;
use tracker_core::{BarSeries, Quote, Symbol, TrackerResult};
use tracker_finnhub::FinnhubClient;

/// Source of quotes and bars
///
/// Implementations must be safe to call concurrently from many sessions and
/// must not cache: every call reflects the provider's current state.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current quote for `symbol`, stamped with the capture time
    async fn get_quote(&self, symbol: &Symbol) -> TrackerResult<Quote>;

    /// Bars for `symbol` over the last `window_minutes`
    async fn get_bars(&self, symbol: &Symbol, window_minutes: i64) -> TrackerResult<BarSeries>;
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    async fn get_quote(&self, symbol: &Symbol) -> TrackerResult<Quote> {
        FinnhubClient::get_quote(self, symbol).await
    }

    async fn get_bars(&self, symbol: &Symbol, window_minutes: i64) -> TrackerResult<BarSeries> {
        FinnhubClient::get_bars(self, symbol, window_minutes).await
    }
}
