//! Finnhub API client
//!
//! Provides methods for the Finnhub quote and candle REST endpoints.

use crate::config::FinnhubConfig;
use crate::types::{CandleResponse, QuoteResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracker_core::{BarSeries, BarWindow, Quote, Symbol, TrackerError};
use tracing::{debug, instrument};

/// Candle resolution requested from Finnhub (1-minute bars)
const CANDLE_RESOLUTION: &str = "1";

/// Finnhub API client
///
/// Cheap to clone: the underlying `reqwest::Client` is a pooled handle, so
/// concurrent calls share connections without serializing on each other.
#[derive(Clone)]
pub struct FinnhubClient {
    client: Client,
    config: FinnhubConfig,
}

impl FinnhubClient {
    /// Create a new Finnhub client from an explicit configuration
    pub fn new(config: FinnhubConfig) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TrackerError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the current quote for a symbol
    #[instrument(skip(self))]
    pub async fn get_quote(&self, symbol: &Symbol) -> Result<Quote, TrackerError> {
        debug!("Fetching Finnhub quote");

        let quote: QuoteResponse = self
            .get_json("quote", &[("symbol", symbol.as_str().to_string())])
            .await?;

        Ok(quote.to_quote(symbol))
    }

    /// Get 1-minute bars for a symbol covering the last `window_minutes`
    ///
    /// A non-positive window falls back to the default of 60 minutes.
    #[instrument(skip(self))]
    pub async fn get_bars(
        &self,
        symbol: &Symbol,
        window_minutes: i64,
    ) -> Result<BarSeries, TrackerError> {
        let window = BarWindow::ending_now(window_minutes);

        debug!(
            "Fetching Finnhub candles from {} to {} ({} minutes)",
            window.from,
            window.to,
            window.minutes()
        );

        let candles: CandleResponse = self
            .get_json(
                "stock/candle",
                &[
                    ("symbol", symbol.as_str().to_string()),
                    ("resolution", CANDLE_RESOLUTION.to_string()),
                    ("from", window.from.to_string()),
                    ("to", window.to.to_string()),
                ],
            )
            .await?;

        let series = candles
            .to_bar_series(symbol)
            .map_err(|e| TrackerError::parse(format!("Failed to parse candles response: {}", e)))?;

        debug!("Received {} candles with status {}", series.len(), series.status);
        Ok(series)
    }

    /// Issue one GET against `path` and decode the JSON body
    ///
    /// Non-2xx statuses become `Api` errors; transport failures (including the
    /// per-call timeout) become `Network` errors; bad bodies become `Parse`
    /// errors. Nothing is retried. Transport errors are stripped of the request
    /// URL since it carries the API token.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TrackerError> {
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("token", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                TrackerError::network(format!("Failed to fetch {}: {}", path, e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::api(
                status.as_u16(),
                format!("Finnhub {} returned {}: {}", path, status, body),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                TrackerError::network(format!(
                    "Failed to read {} body: {}",
                    path,
                    e.without_url()
                ))
            })?;

        serde_json::from_slice(&body)
            .map_err(|e| TrackerError::parse(format!("Failed to parse {} response: {}", path, e)))
    }
}
