//! Payload bodies for non-dispatch frames

use serde::{Deserialize, Serialize};
use unicord_core::{Intents, User};

/// Hello payload (op 10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Interval in milliseconds at which the client must heartbeat
    pub heartbeat_interval: u64,
}

/// Client properties sent with Identify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProperties {
    pub os: String,
    pub browser: String,
    pub device: String,
}

impl Default for ConnectionProperties {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            browser: "unicord".to_string(),
            device: "unicord".to_string(),
        }
    }
}

/// Identify payload (op 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifyPayload {
    pub token: String,
    pub intents: Intents,
    pub properties: ConnectionProperties,
    /// `[shard_id, shard_count]`
    pub shard: [u16; 2],
}

/// Resume payload (op 6)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumePayload {
    pub token: String,
    pub session_id: String,
    /// Last sequence number seen before the drop
    pub seq: Option<u64>,
}

/// READY dispatch payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<u8>,
    /// The bot's own user
    pub user: User,
    pub session_id: String,
    /// Endpoint to use for resuming this session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_gateway_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard: Option<[u16; 2]>,
    /// Partial application object for the bot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<ReadyApplication>,
}

/// The `application` object carried in READY
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyApplication {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_payload_shape() {
        let payload = IdentifyPayload {
            token: "bot-token".to_string(),
            intents: Intents::DEFAULT,
            properties: ConnectionProperties {
                os: "linux".to_string(),
                browser: "unicord".to_string(),
                device: "unicord".to_string(),
            },
            shard: [0, 1],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["token"], "bot-token");
        assert_eq!(json["intents"], 513);
        assert_eq!(json["properties"]["os"], "linux");
        assert_eq!(json["shard"], serde_json::json!([0, 1]));
    }

    #[test]
    fn test_resume_payload_shape() {
        let payload = ResumePayload {
            token: "bot-token".to_string(),
            session_id: "abc".to_string(),
            seq: Some(42),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"token": "bot-token", "session_id": "abc", "seq": 42})
        );
    }

    #[test]
    fn test_ready_payload_parse() {
        let json = serde_json::json!({
            "v": 10,
            "user": {"id": "987", "username": "TestBot", "bot": true},
            "session_id": "sess-1",
            "resume_gateway_url": "wss://resume.example",
            "application": {"id": "555", "flags": 0}
        });
        let ready: ReadyPayload = serde_json::from_value(json).unwrap();
        assert_eq!(ready.session_id, "sess-1");
        assert_eq!(ready.user.id, "987");
        assert_eq!(ready.resume_gateway_url.as_deref(), Some("wss://resume.example"));
        assert_eq!(ready.application.as_ref().map(|a| a.id.as_str()), Some("555"));
    }

    #[test]
    fn test_ready_payload_parse_without_application() {
        let json = serde_json::json!({
            "user": {"id": "987", "username": "TestBot"},
            "session_id": "sess-2"
        });
        let ready: ReadyPayload = serde_json::from_value(json).unwrap();
        assert!(ready.application.is_none());
    }
}
