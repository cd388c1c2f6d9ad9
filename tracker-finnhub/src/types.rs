//! Finnhub API response types
//!
//! These types mirror the Finnhub responses and are converted
//! to tracker-core types for use in the gateway.

use serde::Deserialize;
use tracker_core::{BarSeries, BarStatus, Quote, Symbol};

/// Response from GET /quote
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    /// Current price
    #[serde(rename = "c")]
    pub current: f64,

    /// High price of the day
    #[serde(rename = "h", default)]
    pub high: Option<f64>,

    /// Low price of the day
    #[serde(rename = "l", default)]
    pub low: Option<f64>,

    /// Open price of the day
    #[serde(rename = "o", default)]
    pub open: Option<f64>,

    /// Previous close price
    #[serde(rename = "pc", default)]
    pub previous_close: Option<f64>,
}

impl QuoteResponse {
    /// Convert to a core quote captured now
    pub fn to_quote(&self, symbol: &Symbol) -> Quote {
        Quote::observed_now(symbol.clone(), self.current)
    }
}

/// Response from GET /stock/candle
///
/// On `no_data` Finnhub omits the arrays entirely, so every sequence
/// defaults to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleResponse {
    #[serde(rename = "c", default)]
    pub close: Vec<f64>,

    #[serde(rename = "h", default)]
    pub high: Vec<f64>,

    #[serde(rename = "l", default)]
    pub low: Vec<f64>,

    #[serde(rename = "o", default)]
    pub open: Vec<f64>,

    /// Bar open times (unix seconds)
    #[serde(rename = "t", default)]
    pub time: Vec<i64>,

    #[serde(rename = "v", default)]
    pub volume: Vec<f64>,

    /// "ok" or "no_data"
    #[serde(rename = "s", default)]
    pub status: String,
}

impl CandleResponse {
    /// Convert to a core bar series
    ///
    /// Anything other than `"ok"` is treated as no data and yields empty
    /// sequences. An ok body whose arrays disagree in length is a decode
    /// failure.
    pub fn to_bar_series(self, symbol: &Symbol) -> Result<BarSeries, String> {
        if self.status != "ok" {
            return Ok(BarSeries::no_data(symbol.clone()));
        }

        let series = BarSeries {
            symbol: symbol.clone(),
            status: BarStatus::Ok,
            timestamps: self.time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        };

        if !series.is_aligned() {
            return Err(format!(
                "candle arrays have mismatched lengths (t={}, o={}, h={}, l={}, c={}, v={})",
                series.timestamps.len(),
                series.open.len(),
                series.high.len(),
                series.low.len(),
                series.close.len(),
                series.volume.len()
            ));
        }

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let json = r#"{"c":261.74,"h":263.31,"l":260.68,"o":261.07,"pc":259.45,"t":1582641000}"#;
        let quote: QuoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(quote.current, 261.74);
        assert_eq!(quote.previous_close, Some(259.45));

        let core = quote.to_quote(&Symbol::from("AAPL"));
        assert_eq!(core.symbol.as_str(), "AAPL");
        assert_eq!(core.price, 261.74);
        assert!(core.observed_at_millis > 0);
    }

    #[test]
    fn test_quote_without_current_price_fails() {
        let json = r#"{"error":"You don't have access to this resource."}"#;
        assert!(serde_json::from_str::<QuoteResponse>(json).is_err());
    }

    #[test]
    fn test_parse_ok_candles() {
        let json = r#"{
            "s": "ok",
            "t": [1000, 1060],
            "o": [10, 11],
            "h": [12, 12],
            "l": [9, 9],
            "c": [11, 11.5],
            "v": [100, 150]
        }"#;
        let candles: CandleResponse = serde_json::from_str(json).unwrap();
        let series = candles.to_bar_series(&Symbol::from("TSLA")).unwrap();

        assert_eq!(series.status, BarStatus::Ok);
        assert_eq!(series.timestamps, vec![1000, 1060]);
        assert_eq!(series.close, vec![11.0, 11.5]);
        assert_eq!(series.volume, vec![100.0, 150.0]);
        assert!(series.is_aligned());
    }

    #[test]
    fn test_parse_no_data_candles() {
        let candles: CandleResponse = serde_json::from_str(r#"{"s":"no_data"}"#).unwrap();
        let series = candles.to_bar_series(&Symbol::from("TSLA")).unwrap();

        assert_eq!(series.status, BarStatus::NoData);
        assert!(series.timestamps.is_empty());
        assert!(series.is_empty());
    }

    #[test]
    fn test_mismatched_candle_arrays_rejected() {
        let json = r#"{"s":"ok","t":[1000,1060],"o":[10],"h":[12,12],"l":[9,9],"c":[11,11.5],"v":[100,150]}"#;
        let candles: CandleResponse = serde_json::from_str(json).unwrap();
        assert!(candles.to_bar_series(&Symbol::from("TSLA")).is_err());
    }
}
