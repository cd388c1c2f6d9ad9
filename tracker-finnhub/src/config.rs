//! Finnhub client configuration

use std::env;
use std::time::Duration;
use tracker_core::TrackerError;
use tracing::warn;

/// Base URL for the Finnhub REST API
pub const FINNHUB_API_BASE: &str = "https://finnhub.io/api/v1";

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Finnhub REST API
///
/// Built once at startup and handed to [`crate::FinnhubClient::new`].
#[derive(Clone)]
pub struct FinnhubConfig {
    /// API token, sent as the `token` query parameter
    pub api_key: String,
    /// REST base URL without a trailing slash
    pub base_url: String,
    /// Timeout applied to every call
    pub timeout: Duration,
}

impl FinnhubConfig {
    /// Create a config for the production API with the default timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: FINNHUB_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different base URL (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - FINNHUB_API_KEY: API token (required)
    /// - FINNHUB_BASE_URL: REST base URL (optional)
    /// - FINNHUB_TIMEOUT_SECS: per-call timeout in seconds (optional, default 10)
    pub fn from_env() -> Result<Self, TrackerError> {
        let api_key = env::var("FINNHUB_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TrackerError::config("FINNHUB_API_KEY is not set"))?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = env::var("FINNHUB_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        if let Ok(raw) = env::var("FINNHUB_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring invalid FINNHUB_TIMEOUT_SECS={:?}, using {:?}",
                    raw, DEFAULT_TIMEOUT
                ),
            }
        }

        Ok(config)
    }
}

impl std::fmt::Debug for FinnhubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
