//! Wire-format entities
//!
//! Field sets follow the remote platform's JSON contracts verbatim; unknown
//! fields are ignored on deserialization and `None` fields are omitted on
//! serialization.

mod channel;
mod component;
mod embed;
mod guild;
mod interaction;
mod message;
mod user;

pub use channel::Channel;
pub use component::{
    ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectOption, TextInput, TextInputStyle,
};
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage};
pub use guild::PartialGuild;
pub use interaction::{
    Interaction, InteractionCallbackData, InteractionData, InteractionDataOption,
    InteractionResponse, InteractionResponseType, InteractionType,
};
pub use message::{
    AllowedMentions, Attachment, Emoji, FileData, Message, MessageDelete, MessagePayload,
    MessageReference, Reaction,
};
pub use user::{Member, User};
