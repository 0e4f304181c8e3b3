//! Session lifecycle state

use std::time::Duration;

/// Connection lifecycle of a gateway session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not connected and not trying to connect
    Disconnected,
    /// Opening the websocket
    Connecting,
    /// Socket open, waiting for the server Hello
    AwaitingHello,
    /// Hello received, Identify sent, waiting for Ready
    Identifying,
    /// Hello received, Resume sent, waiting for replay
    Resuming,
    /// Ready received, dispatch flowing
    Connected,
}

impl SessionState {
    /// Whether the session can currently receive dispatch events
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::AwaitingHello => "awaiting_hello",
            Self::Identifying => "identifying",
            Self::Resuming => "resuming",
            Self::Connected => "connected",
        };
        write!(f, "{s}")
    }
}

/// Resume descriptor captured from Ready
///
/// Present only after a successful Identify; cleared when the server
/// invalidates the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: String,
    pub resume_url: String,
    pub seq: Option<u64>,
}

/// Exponential reconnect backoff, capped at one minute
#[must_use]
pub fn reconnect_delay(attempts: u32) -> Duration {
    let millis = 1000u64
        .saturating_mul(1u64 << attempts.min(16))
        .min(60_000);
    Duration::from_millis(millis)
}
