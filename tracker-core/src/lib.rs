//! Core types for the Stock Tracker gateway
//!
//! This crate defines the shared data structures used across the gateway,
//! including symbols, quotes, bar series and the streaming wire format.

pub mod error;
pub mod market;
pub mod websocket;

pub use error::{TrackerError, TrackerResult};
pub use market::{
    BarSeries, BarStatus, BarWindow, Quote, Symbol, DEFAULT_WINDOW_MINUTES, MAX_WINDOW_MINUTES,
};
pub use websocket::QuoteMessage;
