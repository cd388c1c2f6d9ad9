//! Market data types: symbols, quotes and bar series

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Window used when a bars request carries no usable window
pub const DEFAULT_WINDOW_MINUTES: i64 = 60;

/// Largest window a client may request
pub const MAX_WINDOW_MINUTES: i64 = 5000;

/// A ticker symbol (e.g., "AAPL")
///
/// Opaque and case-sensitive. It is never checked against a registry and is
/// passed through to the upstream provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single current price observation for a symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    /// Current price as reported by the provider
    pub price: f64,
    /// Wall-clock time the quote was captured by this gateway (epoch millis),
    /// not the provider's own timestamp
    pub observed_at_millis: i64,
}

impl Quote {
    /// Build a quote stamped with the current wall-clock time
    pub fn observed_now(symbol: Symbol, price: f64) -> Self {
        Self {
            symbol,
            price,
            observed_at_millis: Utc::now().timestamp_millis(),
        }
    }
}

/// Status of a bar series as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarStatus {
    Ok,
    NoData,
}

impl BarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarStatus::Ok => "ok",
            BarStatus::NoData => "no_data",
        }
    }
}

impl fmt::Display for BarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OHLCV bars for a symbol, stored as parallel sequences
///
/// When `status` is `Ok` every sequence has the same length. When it is
/// `NoData` every sequence is empty. Timestamps are unix seconds in the order
/// the provider returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub symbol: Symbol,
    pub status: BarStatus,
    pub timestamps: Vec<i64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl BarSeries {
    /// An empty series with `NoData` status
    pub fn no_data(symbol: Symbol) -> Self {
        Self {
            symbol,
            status: BarStatus::NoData,
            timestamps: Vec::new(),
            open: Vec::new(),
            high: Vec::new(),
            low: Vec::new(),
            close: Vec::new(),
            volume: Vec::new(),
        }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when there is nothing to chart: a non-ok status or no timestamps
    pub fn is_empty(&self) -> bool {
        self.status != BarStatus::Ok || self.timestamps.is_empty()
    }

    /// Check that all six sequences have the same length
    pub fn is_aligned(&self) -> bool {
        let n = self.timestamps.len();
        [
            self.open.len(),
            self.high.len(),
            self.low.len(),
            self.close.len(),
            self.volume.len(),
        ]
        .iter()
        .all(|&len| len == n)
    }
}

/// Absolute time window for a bars query (unix seconds, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarWindow {
    pub from: i64,
    pub to: i64,
}

impl BarWindow {
    /// Window of `minutes` ending at `now`
    ///
    /// Non-positive windows are replaced with `DEFAULT_WINDOW_MINUTES`.
    pub fn ending_at(now: DateTime<Utc>, minutes: i64) -> Self {
        let minutes = if minutes <= 0 {
            DEFAULT_WINDOW_MINUTES
        } else {
            minutes
        };
        Self {
            from: (now - Duration::minutes(minutes)).timestamp(),
            to: now.timestamp(),
        }
    }

    /// Window of `minutes` ending now
    pub fn ending_now(minutes: i64) -> Self {
        Self::ending_at(Utc::now(), minutes)
    }

    pub fn minutes(&self) -> i64 {
        (self.to - self.from) / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> BarSeries {
        BarSeries {
            symbol: Symbol::from("TSLA"),
            status: BarStatus::Ok,
            timestamps: vec![1000, 1060],
            open: vec![10.0, 11.0],
            high: vec![12.0, 12.0],
            low: vec![9.0, 9.0],
            close: vec![11.0, 11.5],
            volume: vec![100.0, 150.0],
        }
    }

    #[test]
    fn test_symbol_is_case_sensitive() {
        assert_ne!(Symbol::from("aapl"), Symbol::from("AAPL"));
        assert_eq!(Symbol::from("BRK.B").to_string(), "BRK.B");
    }

    #[test]
    fn test_series_alignment() {
        let mut series = sample_series();
        assert!(series.is_aligned());
        assert!(!series.is_empty());
        assert_eq!(series.len(), 2);

        series.volume.pop();
        assert!(!series.is_aligned());
    }

    #[test]
    fn test_no_data_series_is_empty() {
        let series = BarSeries::no_data(Symbol::from("TSLA"));
        assert!(series.is_empty());
        assert!(series.is_aligned());
        assert_eq!(series.status.as_str(), "no_data");
    }

    #[test]
    fn test_ok_status_without_timestamps_is_empty() {
        let mut series = sample_series();
        series.timestamps.clear();
        assert!(series.is_empty());
    }

    #[test]
    fn test_window_ends_at_now() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let window = BarWindow::ending_at(now, 30);
        assert_eq!(window.to, 1_700_000_000);
        assert_eq!(window.from, 1_700_000_000 - 30 * 60);
        assert_eq!(window.minutes(), 30);
    }

    #[test]
    fn test_non_positive_window_uses_default() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(BarWindow::ending_at(now, 0).minutes(), DEFAULT_WINDOW_MINUTES);
        assert_eq!(BarWindow::ending_at(now, -5).minutes(), DEFAULT_WINDOW_MINUTES);
    }
}
