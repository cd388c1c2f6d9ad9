//! Business logic services for the Stock Tracker gateway
//!
//! This crate provides:
//! - The market data provider seam over the upstream client
//! - The bars query service backing `/api/candles`
//! - Live quote streaming sessions backing `/ws`

pub mod bars;
pub mod provider;
pub mod streaming;

#[cfg(test)]
pub(crate) mod testing;

pub use bars::{parse_window_minutes, BarsService, CandlesResponse};
pub use provider::MarketDataProvider;
pub use streaming::{
    CloseReason, QuoteSession, SessionState, SessionSummary, StopSignal, StreamConfig,
};
