//! Gateway configuration loaded from environment variables

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracker_core::TrackerError;
use tracker_finnhub::FinnhubConfig;
use tracker_services::StreamConfig;
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "./static";

/// Everything the gateway needs at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Directory served at `/`
    pub static_dir: PathBuf,
    pub stream: StreamConfig,
    pub finnhub: FinnhubConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - FINNHUB_API_KEY (required), FINNHUB_BASE_URL, FINNHUB_TIMEOUT_SECS
    /// - SERVER_PORT, STATIC_DIR
    /// - QUOTE_POLL_INTERVAL_SECS, QUOTE_WRITE_TIMEOUT_SECS, DEFAULT_SYMBOL
    ///
    /// Unparseable optional values fall back to their defaults with a warning.
    pub fn from_env() -> Result<Self, TrackerError> {
        let finnhub = FinnhubConfig::from_env()?;

        let defaults = StreamConfig::default();
        let stream = StreamConfig {
            poll_interval: env_secs("QUOTE_POLL_INTERVAL_SECS", defaults.poll_interval),
            write_timeout: env_secs("QUOTE_WRITE_TIMEOUT_SECS", defaults.write_timeout),
            default_symbol: env::var("DEFAULT_SYMBOL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.default_symbol),
        };

        Ok(Self {
            port: env_parse("SERVER_PORT", DEFAULT_PORT),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
            stream,
            finnhub,
        })
    }
}

/// Parse an optional variable, keeping `default` when unset or invalid
fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Parse a positive number of seconds
fn env_secs(name: &str, default: Duration) -> Duration {
    match env_parse::<u64>(name, 0) {
        0 => default,
        secs => Duration::from_secs(secs),
    }
}
