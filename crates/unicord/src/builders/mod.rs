//! Fluent builders for outbound message content

pub mod components;
pub mod embed;

pub use components::{action_row, button, link_button, string_select, text_input};
pub use embed::EmbedBuilder;
