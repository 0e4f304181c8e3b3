//! # unicord
//!
//! Event-driven bot runtime for a Discord-compatible chat platform:
//! persistent gateway sessions with resume and backoff, a per-route
//! rate-limited REST dispatcher, and a command/middleware pipeline.
//!
//! ```no_run
//! use unicord::{Bot, BotConfig};
//!
//! #[tokio::main]
//! async fn main() -> unicord::Result<()> {
//!     let mut bot = Bot::new(BotConfig::new("token"));
//!     bot.command("ping", &[], |ctx| async move {
//!         ctx.reply("pong").await?;
//!         Ok(())
//!     });
//!     bot.start().await
//! }
//! ```

pub mod bot;
pub mod builders;
pub mod dispatch;

pub use bot::Bot;
pub use builders::EmbedBuilder;
pub use dispatch::{
    ComponentContext, DispatchContext, HandlerResult, InteractionContext, MessageContext,
    Middleware, Next,
};

pub use unicord_common::{BotConfig, Error, Result};
pub use unicord_core as core;
pub use unicord_gateway as gateway;
pub use unicord_rest as rest;
