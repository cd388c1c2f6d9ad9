//! Live quote streaming
//!
//! One [`QuoteSession`] per upgraded connection: it pushes a quote right
//! away, then one per poll interval, until a fetch or send fails, the client
//! goes away, or the process shuts down.

mod config;
mod session;

pub use config::StreamConfig;
pub use session::{CloseReason, QuoteSession, SessionState, SessionSummary, StopSignal};
