//! Finnhub integration for the Stock Tracker gateway
//!
//! This crate provides a client for the two Finnhub REST endpoints the
//! gateway relies on: the current quote and 1-minute stock candles.

pub mod client;
pub mod config;
pub mod types;

pub use client::FinnhubClient;
pub use config::FinnhubConfig;
