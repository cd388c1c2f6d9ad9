//! WebSocket message types for live quote streaming
//!
//! The stream is push-only: the server sends one `QuoteMessage` per poll
//! tick and never expects structured messages from the client.

use serde::{Deserialize, Serialize};

use crate::{Quote, Symbol};

/// Quote pushed to a streaming client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteMessage {
    pub symbol: Symbol,
    pub price: f64,
    /// Capture time in epoch milliseconds
    pub time: i64,
}

impl From<&Quote> for QuoteMessage {
    fn from(quote: &Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            price: quote.price,
            time: quote.observed_at_millis,
        }
    }
}
