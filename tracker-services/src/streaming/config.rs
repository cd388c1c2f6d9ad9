//! Streaming session settings

use std::time::Duration;
use tracker_core::Symbol;

/// Symbol streamed when the client does not name one
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// Settings shared by every streaming session
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Pause between the end of one tick and the start of the next.
    /// Coarse on purpose to stay under provider rate limits.
    pub poll_interval: Duration,
    /// Deadline for writing a single message (and for the final close)
    pub write_timeout: Duration,
    /// Symbol used when the upgrade request carries none
    pub default_symbol: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
            default_symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

impl StreamConfig {
    /// Symbol to stream for a raw `symbol` query parameter
    pub fn resolve_symbol(&self, requested: Option<&str>) -> Symbol {
        match requested {
            Some(s) if !s.is_empty() => Symbol::from(s),
            _ => Symbol::from(self.default_symbol.as_str()),
        }
    }
}
