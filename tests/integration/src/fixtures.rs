//! Test fixtures and frame builders
//!
//! Reusable wire frames and entities for driving sessions and the
//! dispatch pipeline.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};
use unicord_core::{Interaction, Message, User};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A dispatch frame (op 0)
pub fn dispatch_frame(event: &str, seq: u64, data: Value) -> Value {
    json!({"op": 0, "t": event, "s": seq, "d": data})
}

/// A READY dispatch frame
pub fn ready_frame(session_id: &str, seq: u64) -> Value {
    dispatch_frame(
        "READY",
        seq,
        json!({
            "v": 10,
            "user": {"id": "900", "username": "unicord-test", "bot": true},
            "session_id": session_id,
            "resume_gateway_url": "ws://127.0.0.1:1",
        }),
    )
}

/// A MESSAGE_CREATE dispatch frame from a human author
pub fn message_frame(content: &str, seq: u64) -> Value {
    let suffix = unique_suffix();
    dispatch_frame(
        "MESSAGE_CREATE",
        seq,
        json!({
            "id": format!("msg-{suffix}"),
            "channel_id": "chan-1",
            "content": content,
            "author": {"id": "7", "username": "alice"},
        }),
    )
}

/// A message entity for direct pipeline tests
pub fn user_message(content: &str) -> Message {
    let suffix = unique_suffix();
    Message {
        id: format!("msg-{suffix}"),
        channel_id: "chan-1".to_string(),
        author: User {
            id: "7".to_string(),
            username: "alice".to_string(),
            ..User::default()
        },
        content: content.to_string(),
        ..Message::default()
    }
}

/// A slash-command interaction entity
pub fn slash_interaction(name: &str) -> Interaction {
    serde_json::from_value(json!({
        "id": format!("int-{}", unique_suffix()),
        "application_id": "app-1",
        "type": 2,
        "token": "interaction-token",
        "channel_id": "chan-1",
        "user": {"id": "7", "username": "alice"},
        "data": {"name": name},
    }))
    .expect("valid interaction fixture")
}

/// A button-press interaction entity
pub fn button_interaction(custom_id: &str) -> Interaction {
    serde_json::from_value(json!({
        "id": format!("int-{}", unique_suffix()),
        "application_id": "app-1",
        "type": 3,
        "token": "interaction-token",
        "channel_id": "chan-1",
        "user": {"id": "7", "username": "alice"},
        "data": {"custom_id": custom_id, "component_type": 2},
    }))
    .expect("valid interaction fixture")
}
