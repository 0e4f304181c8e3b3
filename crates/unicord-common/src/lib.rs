//! # unicord-common
//!
//! Cross-cutting concerns shared by every layer: the error taxonomy,
//! environment-based configuration, and tracing setup.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{BotConfig, ConfigError};
pub use error::{Error, Result};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig};
