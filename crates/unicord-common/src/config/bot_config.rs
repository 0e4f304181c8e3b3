//! Bot configuration
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;
use unicord_core::Intents;

/// Runtime configuration for a bot process
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot token used for Identify and REST authorization
    pub token: String,
    /// Gateway intents requested at identify time
    #[serde(default)]
    pub intents: Intents,
    /// Textual command prefix, e.g. `"!"`
    #[serde(default)]
    pub prefix: Option<String>,
    /// Number of gateway shards to spawn
    #[serde(default = "default_shard_count")]
    pub shard_count: u16,
    /// Gateway endpoint
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// REST base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_shard_count() -> u16 {
    1
}

fn default_gateway_url() -> String {
    "wss://gateway.discord.gg/?v=10&encoding=json".to_string()
}

fn default_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

impl BotConfig {
    /// Build a configuration from a token with defaults for everything else
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            intents: Intents::DEFAULT,
            prefix: None,
            shard_count: default_shard_count(),
            gateway_url: default_gateway_url(),
            api_base_url: default_api_base_url(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `DISCORD_TOKEN` is missing or a numeric variable
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            token: env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingVar("DISCORD_TOKEN"))?,
            intents: match env::var("DISCORD_INTENTS") {
                Ok(raw) => Intents::from_bits_truncate(
                    raw.parse()
                        .map_err(|_| ConfigError::InvalidValue("DISCORD_INTENTS", raw))?,
                ),
                Err(_) => Intents::DEFAULT,
            },
            prefix: env::var("BOT_PREFIX").ok(),
            shard_count: match env::var("SHARD_COUNT") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("SHARD_COUNT", raw))?,
                Err(_) => default_shard_count(),
            },
            gateway_url: env::var("GATEWAY_URL").unwrap_or_else(|_| default_gateway_url()),
            api_base_url: env::var("API_BASE_URL").unwrap_or_else(|_| default_api_base_url()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
