//! Dispatch contexts
//!
//! One context per triggering event, built fresh for every dispatch. The
//! reply-like operations close over identifiers captured at construction
//! (message id, interaction id + token); they stop working when the
//! server-side token or message naturally expires, which is not enforced
//! here.

use std::sync::Arc;

use unicord_common::Result;
use unicord_core::{
    Interaction, InteractionCallbackData, InteractionResponse, InteractionResponseType, Message,
    MessagePayload, MessageReference, User,
};
use unicord_rest::RestClient;

/// Context for a message-triggered handler
#[derive(Clone)]
pub struct MessageContext {
    rest: Arc<RestClient>,
    pub message: Arc<Message>,
    /// Parsed command arguments; empty outside the command path
    pub args: Vec<String>,
}

impl MessageContext {
    #[must_use]
    pub fn new(rest: Arc<RestClient>, message: Arc<Message>) -> Self {
        Self {
            rest,
            message,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn author(&self) -> &User {
        &self.message.author
    }

    #[must_use]
    pub fn channel_id(&self) -> &str {
        &self.message.channel_id
    }

    /// Send a message referencing the triggering one
    pub async fn reply(&self, payload: impl Into<MessagePayload>) -> Result<Message> {
        let mut payload = payload.into();
        payload.message_reference = Some(MessageReference::to_message(self.message.id.clone()));
        self.rest
            .create_message(&self.message.channel_id, &payload)
            .await
    }

    /// Send a plain message to the same channel
    pub async fn send(&self, payload: impl Into<MessagePayload>) -> Result<Message> {
        self.rest
            .create_message(&self.message.channel_id, &payload.into())
            .await
    }

    /// React to the triggering message
    pub async fn react(&self, emoji: &str) -> Result<()> {
        self.rest
            .create_reaction(&self.message.channel_id, &self.message.id, emoji)
            .await
    }

    /// Edit the triggering message (only valid for the bot's own messages)
    pub async fn edit(&self, payload: impl Into<MessagePayload>) -> Result<Message> {
        self.rest
            .edit_message(&self.message.channel_id, &self.message.id, &payload.into())
            .await
    }

    /// Delete the triggering message
    pub async fn delete(&self) -> Result<()> {
        self.rest
            .delete_message(&self.message.channel_id, &self.message.id)
            .await
    }
}

/// Context for an application-command interaction
#[derive(Clone)]
pub struct InteractionContext {
    rest: Arc<RestClient>,
    pub interaction: Arc<Interaction>,
}

impl InteractionContext {
    #[must_use]
    pub fn new(rest: Arc<RestClient>, interaction: Arc<Interaction>) -> Self {
        Self { rest, interaction }
    }

    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.interaction
            .data
            .as_ref()
            .and_then(|data| data.name.as_deref())
    }

    #[must_use]
    pub fn actor(&self) -> Option<&User> {
        self.interaction.actor()
    }

    /// Respond with a message (callback type 4)
    pub async fn reply(&self, data: impl Into<InteractionCallbackData>) -> Result<()> {
        self.respond(InteractionResponse::new(
            InteractionResponseType::ChannelMessageWithSource,
            Some(data.into()),
        ))
        .await
    }

    /// Acknowledge now, answer later (callback type 5)
    pub async fn defer(&self) -> Result<()> {
        self.respond(InteractionResponse::ack(
            InteractionResponseType::DeferredChannelMessageWithSource,
        ))
        .await
    }

    /// Open a modal form (callback type 9)
    pub async fn show_modal(&self, data: InteractionCallbackData) -> Result<()> {
        self.respond(InteractionResponse::new(
            InteractionResponseType::Modal,
            Some(data),
        ))
        .await
    }

    /// Edit the original response after a reply or defer
    pub async fn edit_reply(&self, payload: impl Into<MessagePayload>) -> Result<Message> {
        self.rest
            .edit_original_response(
                &self.interaction.application_id,
                &self.interaction.token,
                &payload.into(),
            )
            .await
    }

    /// Delete the original response
    pub async fn delete_reply(&self) -> Result<()> {
        self.rest
            .delete_original_response(&self.interaction.application_id, &self.interaction.token)
            .await
    }

    /// Send an additional follow-up message
    pub async fn follow_up(&self, payload: impl Into<MessagePayload>) -> Result<Message> {
        self.rest
            .create_followup_message(
                &self.interaction.application_id,
                &self.interaction.token,
                &payload.into(),
            )
            .await
    }

    async fn respond(&self, response: InteractionResponse) -> Result<()> {
        self.rest
            .create_interaction_response(&self.interaction.id, &self.interaction.token, &response)
            .await
    }
}

/// Context for a message-component interaction (buttons, selects, modals)
#[derive(Clone)]
pub struct ComponentContext {
    rest: Arc<RestClient>,
    pub interaction: Arc<Interaction>,
}

impl ComponentContext {
    #[must_use]
    pub fn new(rest: Arc<RestClient>, interaction: Arc<Interaction>) -> Self {
        Self { rest, interaction }
    }

    #[must_use]
    pub fn custom_id(&self) -> Option<&str> {
        self.interaction
            .data
            .as_ref()
            .and_then(|data| data.custom_id.as_deref())
    }

    /// Selected values for select-menu components
    #[must_use]
    pub fn values(&self) -> &[String] {
        self.interaction
            .data
            .as_ref()
            .map_or(&[], |data| data.values.as_slice())
    }

    #[must_use]
    pub fn actor(&self) -> Option<&User> {
        self.interaction.actor()
    }

    /// Respond with a new message (callback type 4)
    pub async fn reply(&self, data: impl Into<InteractionCallbackData>) -> Result<()> {
        self.respond(InteractionResponse::new(
            InteractionResponseType::ChannelMessageWithSource,
            Some(data.into()),
        ))
        .await
    }

    /// Rewrite the message the component lives on (callback type 7)
    pub async fn update(&self, data: impl Into<InteractionCallbackData>) -> Result<()> {
        self.respond(InteractionResponse::new(
            InteractionResponseType::UpdateMessage,
            Some(data.into()),
        ))
        .await
    }

    /// Acknowledge without changing anything yet (callback type 6)
    pub async fn defer_update(&self) -> Result<()> {
        self.respond(InteractionResponse::ack(
            InteractionResponseType::DeferredUpdateMessage,
        ))
        .await
    }

    /// Send an additional follow-up message
    pub async fn follow_up(&self, payload: impl Into<MessagePayload>) -> Result<Message> {
        self.rest
            .create_followup_message(
                &self.interaction.application_id,
                &self.interaction.token,
                &payload.into(),
            )
            .await
    }

    async fn respond(&self, response: InteractionResponse) -> Result<()> {
        self.rest
            .create_interaction_response(&self.interaction.id, &self.interaction.token, &response)
            .await
    }
}

/// The context handed to middleware, tagged by event kind
#[derive(Clone)]
pub enum DispatchContext {
    Message(MessageContext),
    Interaction(InteractionContext),
    Component(ComponentContext),
}

impl DispatchContext {
    /// Reply with plain text, whatever the underlying event kind
    pub async fn reply(&self, content: &str) -> Result<()> {
        match self {
            Self::Message(ctx) => {
                ctx.reply(content).await?;
                Ok(())
            }
            Self::Interaction(ctx) => ctx.reply(content).await,
            Self::Component(ctx) => ctx.reply(content).await,
        }
    }

    #[must_use]
    pub fn actor(&self) -> Option<&User> {
        match self {
            Self::Message(ctx) => Some(ctx.author()),
            Self::Interaction(ctx) => ctx.actor(),
            Self::Component(ctx) => ctx.actor(),
        }
    }

    #[must_use]
    pub fn channel_id(&self) -> Option<&str> {
        match self {
            Self::Message(ctx) => Some(ctx.channel_id()),
            Self::Interaction(ctx) => ctx.interaction.channel_id.as_deref(),
            Self::Component(ctx) => ctx.interaction.channel_id.as_deref(),
        }
    }
}
