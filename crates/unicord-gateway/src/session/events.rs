//! Decoded dispatch events

use serde_json::Value;
use unicord_core::{EventType, Interaction, Message, MessageDelete};

use crate::protocol::ReadyPayload;

/// A dispatch event decoded into its typed payload
///
/// Events whose name or payload we do not model arrive as [`Event::Raw`]
/// so consumers still see the full stream.
#[derive(Debug, Clone)]
pub enum Event {
    Ready(ReadyPayload),
    Resumed,
    MessageCreate(Box<Message>),
    MessageUpdate(Box<Message>),
    MessageDelete(MessageDelete),
    InteractionCreate(Box<Interaction>),
    GuildCreate(Value),
    Raw { name: String, data: Value },
}

impl Event {
    /// Decode a dispatch frame body by event name
    ///
    /// Falls back to [`Event::Raw`] when the name is unknown or the
    /// payload does not match the expected shape, so one odd frame
    /// never takes the session down.
    #[must_use]
    pub fn decode(name: &str, data: Value) -> Self {
        let raw = |data| Self::Raw {
            name: name.to_string(),
            data,
        };

        match EventType::from_str_opt(name) {
            Some(EventType::Ready) => match serde_json::from_value(data.clone()) {
                Ok(ready) => Self::Ready(ready),
                Err(_) => raw(data),
            },
            Some(EventType::Resumed) => Self::Resumed,
            Some(EventType::MessageCreate) => match serde_json::from_value(data.clone()) {
                Ok(msg) => Self::MessageCreate(Box::new(msg)),
                Err(_) => raw(data),
            },
            Some(EventType::MessageUpdate) => match serde_json::from_value(data.clone()) {
                Ok(msg) => Self::MessageUpdate(Box::new(msg)),
                Err(_) => raw(data),
            },
            Some(EventType::MessageDelete) => match serde_json::from_value(data.clone()) {
                Ok(del) => Self::MessageDelete(del),
                Err(_) => raw(data),
            },
            Some(EventType::InteractionCreate) => match serde_json::from_value(data.clone()) {
                Ok(interaction) => Self::InteractionCreate(Box::new(interaction)),
                Err(_) => raw(data),
            },
            Some(EventType::GuildCreate) => Self::GuildCreate(data),
            // known name but no typed payload modelled
            Some(_) | None => raw(data),
        }
    }

    /// Event name as sent on the wire
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ready(_) => EventType::Ready.as_str(),
            Self::Resumed => EventType::Resumed.as_str(),
            Self::MessageCreate(_) => EventType::MessageCreate.as_str(),
            Self::MessageUpdate(_) => EventType::MessageUpdate.as_str(),
            Self::MessageDelete(_) => EventType::MessageDelete.as_str(),
            Self::InteractionCreate(_) => EventType::InteractionCreate.as_str(),
            Self::GuildCreate(_) => EventType::GuildCreate.as_str(),
            Self::Raw { name, .. } => name,
        }
    }
}

/// An event tagged with the shard it arrived on
#[derive(Debug, Clone)]
pub struct ShardEvent {
    pub shard_id: u16,
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_message_create() {
        let data = json!({
            "id": "111",
            "channel_id": "222",
            "content": "hello",
            "author": {"id": "333", "username": "alice"},
        });
        match Event::decode("MESSAGE_CREATE", data) {
            Event::MessageCreate(msg) => {
                assert_eq!(msg.content, "hello");
                assert_eq!(msg.author.username, "alice");
            }
            other => panic!("unexpected event: {}", other.name()),
        }
    }

    #[test]
    fn test_decode_unknown_event_is_raw() {
        let event = Event::decode("TYPING_START", json!({"user_id": "1"}));
        match event {
            Event::Raw { name, data } => {
                assert_eq!(name, "TYPING_START");
                assert_eq!(data["user_id"], "1");
            }
            other => panic!("unexpected event: {}", other.name()),
        }
    }

    #[test]
    fn test_decode_malformed_payload_falls_back_to_raw() {
        let event = Event::decode("MESSAGE_DELETE", json!("not an object"));
        assert!(matches!(event, Event::Raw { .. }));
    }

    #[test]
    fn test_decode_resumed() {
        assert!(matches!(Event::decode("RESUMED", json!(null)), Event::Resumed));
    }

    #[test]
    fn test_event_name_round_trip() {
        let event = Event::decode(
            "MESSAGE_DELETE",
            json!({"id": "1", "channel_id": "2"}),
        );
        assert_eq!(event.name(), "MESSAGE_DELETE");
    }
}
