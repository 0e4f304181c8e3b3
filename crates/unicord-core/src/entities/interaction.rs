//! Interaction entity and interaction response payloads

use super::{ActionRow, AllowedMentions, Embed, Member, Message, User};
use serde::{Deserialize, Serialize};

/// Interaction kinds delivered in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
}

impl From<InteractionType> for u8 {
    fn from(kind: InteractionType) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for InteractionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            3 => Ok(Self::MessageComponent),
            4 => Ok(Self::ApplicationCommandAutocomplete),
            5 => Ok(Self::ModalSubmit),
            other => Err(format!("invalid interaction type: {other}")),
        }
    }
}

/// A single request/response exchange triggered by a user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub application_id: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Present for guild interactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    /// Present for DM interactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Continuation token, valid for 15 minutes
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Box<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Interaction {
    /// The acting user, whether the interaction came from a guild or a DM
    #[must_use]
    pub fn actor(&self) -> Option<&User> {
        self.user
            .as_ref()
            .or_else(|| self.member.as_ref().and_then(|m| m.user.as_ref()))
    }
}

/// Kind-specific interaction payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Command name (application commands)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    /// Component identifier (message components, modals)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u8>,
    /// Selected values (select-menu components)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// A command option supplied by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionDataOption {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
}

/// Response type constants for the interaction callback endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    Modal = 9,
}

impl From<InteractionResponseType> for u8 {
    fn from(kind: InteractionResponseType) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for InteractionResponseType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            5 => Ok(Self::DeferredChannelMessageWithSource),
            6 => Ok(Self::DeferredUpdateMessage),
            7 => Ok(Self::UpdateMessage),
            9 => Ok(Self::Modal),
            other => Err(format!("invalid interaction response type: {other}")),
        }
    }
}

/// Body posted to `/interactions/{id}/{token}/callback`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    #[must_use]
    pub fn new(kind: InteractionResponseType, data: Option<InteractionCallbackData>) -> Self {
        Self { kind, data }
    }

    /// A bare acknowledgement with no message data
    #[must_use]
    pub fn ack(kind: InteractionResponseType) -> Self {
        Self { kind, data: None }
    }
}

/// Message data carried inside an interaction response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    /// Set to 64 for an ephemeral response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
    /// Modal fields (response type 9 only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl InteractionCallbackData {
    /// Plain-text callback data
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

impl From<&str> for InteractionCallbackData {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for InteractionCallbackData {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_deserialize_slash_command() {
        let json = r#"{
            "id": "123",
            "application_id": "456",
            "type": 2,
            "token": "interaction_token",
            "channel_id": "789",
            "user": {"id": "321", "username": "user"},
            "data": {"name": "ping"}
        }"#;
        let interaction: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        assert_eq!(
            interaction.data.as_ref().and_then(|d| d.name.as_deref()),
            Some("ping")
        );
        assert_eq!(interaction.actor().map(|u| u.id.as_str()), Some("321"));
    }

    #[test]
    fn test_interaction_actor_prefers_member_user() {
        let json = r#"{
            "id": "1",
            "application_id": "2",
            "type": 3,
            "token": "t",
            "member": {"user": {"id": "555", "username": "m"}, "roles": []},
            "data": {"custom_id": "ping_button", "component_type": 2}
        }"#;
        let interaction: Interaction = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.actor().map(|u| u.id.as_str()), Some("555"));
    }

    #[test]
    fn test_response_serializes_numeric_type() {
        let response = InteractionResponse::new(
            InteractionResponseType::ChannelMessageWithSource,
            Some(InteractionCallbackData {
                content: Some("pong".to_string()),
                ..InteractionCallbackData::default()
            }),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], 4);
        assert_eq!(json["data"]["content"], "pong");
    }

    #[test]
    fn test_deferred_ack_has_no_data() {
        let json =
            serde_json::to_value(InteractionResponse::ack(
                InteractionResponseType::DeferredChannelMessageWithSource,
            ))
            .unwrap();
        assert_eq!(json, serde_json::json!({"type": 5}));
    }
}
