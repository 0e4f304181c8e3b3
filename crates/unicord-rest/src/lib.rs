//! # unicord-rest
//!
//! HTTP side of the runtime: a per-route rate-limited request dispatcher
//! ([`RateLimiter`] + [`RestClient`]), typed endpoint helpers, one-shot
//! webhook execution and OAuth2 code/PKCE exchange.

pub mod client;
pub mod endpoints;
pub mod oauth;
pub mod ratelimit;
pub mod webhook;

pub use client::RestClient;
pub use ratelimit::RateLimiter;
pub use webhook::execute_webhook;
