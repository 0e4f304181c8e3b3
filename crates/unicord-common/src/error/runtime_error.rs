//! Runtime error taxonomy
//!
//! One error enum shared across the gateway, REST, and dispatch layers.
//! Infrastructure errors (socket, HTTP, JSON) are converted where they occur;
//! handler errors are arbitrary `anyhow` errors absorbed at the dispatch
//! boundary.

use crate::config::ConfigError;
use std::fmt;

/// Errors produced by the client runtime
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Socket-level failure. Recovered internally via reconnect-with-backoff;
    /// never surfaced to handler code by the gateway itself.
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP 429. Retried with the provided hint before surfacing.
    #[error("Rate limited (retry after {retry_after:?}s)")]
    RateLimited {
        /// Server-provided wait in seconds, if any
        retry_after: Option<f64>,
    },

    /// HTTP 5xx. Retried with computed backoff before surfacing.
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// Any other non-success response. Surfaced immediately, no retry.
    #[error("Request failed: {status}")]
    Request {
        status: u16,
        /// Response body, when one was readable
        body: Option<String>,
    },

    /// Malformed JSON on either surface
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure raised inside a middleware or terminal handler
    #[error("Handler error: {0}")]
    Handler(#[source] anyhow::Error),

    /// OAuth token endpoint rejection
    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Build a transport error from any displayable source
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Whether the request dispatcher should retry after this error
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// The server-provided retry hint in seconds, if this error carries one
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, Error>;
