//! Error types for the gateway

use thiserror::Error;

/// Gateway-wide error type
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Bad or missing client input; the message is safe to echo back
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// Write or upgrade failure on a streaming connection
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TrackerError::InvalidArgument(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        TrackerError::Network(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        TrackerError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        TrackerError::Parse(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        TrackerError::Connection(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        TrackerError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        TrackerError::Internal(msg.into())
    }

    /// Whether this error originated at the upstream provider
    /// (transport failure, non-2xx status or undecodable body)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            TrackerError::Network(_) | TrackerError::Api { .. } | TrackerError::Parse(_)
        )
    }
}

/// Result type alias for gateway operations
pub type TrackerResult<T> = Result<T, TrackerError>;
