//! # unicord-core
//!
//! Wire-format data contracts consumed and produced by the gateway and REST
//! layers. This crate has zero dependencies on I/O, transport, or runtime.

pub mod cdn;
pub mod entities;
pub mod events;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionRow, AllowedMentions, Attachment, Button, ButtonStyle, Channel, Component, Embed,
    EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, Emoji, FileData, Interaction,
    InteractionCallbackData, InteractionData, InteractionDataOption, InteractionResponse,
    InteractionResponseType, InteractionType, Member, Message, MessageDelete, MessagePayload,
    MessageReference, PartialGuild, Reaction, SelectMenu, SelectOption, TextInput, TextInputStyle,
    User,
};
pub use events::EventType;
pub use value_objects::{Intents, Permissions};
