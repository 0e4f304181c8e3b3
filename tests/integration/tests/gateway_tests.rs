//! Gateway session tests against the mock server
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use integration_tests::{dispatch_frame, ready_frame, MockGateway};
use serde_json::json;
use unicord_core::Intents;
use unicord_gateway::{Event, GatewaySession, SessionConfig, SessionState};

const WAIT: Duration = Duration::from_secs(5);
const RECONNECT_WAIT: Duration = Duration::from_secs(10);

fn session_config(gateway_url: String) -> SessionConfig {
    SessionConfig {
        token: "test-token".to_string(),
        intents: Intents::DEFAULT,
        gateway_url,
        shard_count: 1,
    }
}

async fn wait_for_state(session: &GatewaySession, state: SessionState, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if session.state() == state {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_session_identifies_after_hello() {
    let mock = MockGateway::start(45_000).await.unwrap();
    let session = GatewaySession::new(session_config(mock.url()), 0);
    session.connect();

    let identify = mock.wait_for_op(2, WAIT).await.expect("no identify frame");
    assert_eq!(identify["d"]["token"], "test-token");
    assert_eq!(identify["d"]["intents"], 513);
    assert_eq!(identify["d"]["shard"], json!([0, 1]));
    assert_eq!(identify["d"]["properties"]["browser"], "unicord");

    session.shutdown();
}

#[tokio::test]
async fn test_session_heartbeats_at_interval() {
    let mock = MockGateway::start(200).await.unwrap();
    let session = GatewaySession::new(session_config(mock.url()), 0);
    session.connect();

    mock.wait_for_op(2, WAIT).await.expect("no identify frame");
    let beat = mock.wait_for_op(1, WAIT).await.expect("no heartbeat frame");
    // no dispatch seen yet, so the beat carries a null sequence
    assert!(beat["d"].is_null());

    session.shutdown();
}

#[tokio::test]
async fn test_ready_marks_connected_and_publishes() {
    let mock = MockGateway::start(45_000).await.unwrap();
    let session = GatewaySession::new(session_config(mock.url()), 0);
    let mut events = session.subscribe();
    session.connect();

    mock.wait_for_op(2, WAIT).await.expect("no identify frame");
    mock.send(ready_frame("sess-1", 1));

    let shard_event = tokio::time::timeout(WAIT, events.recv())
        .await
        .expect("no event published")
        .expect("bus closed");
    assert_eq!(shard_event.shard_id, 0);
    match shard_event.event {
        Event::Ready(ready) => assert_eq!(ready.session_id, "sess-1"),
        other => panic!("unexpected event: {}", other.name()),
    }
    assert!(wait_for_state(&session, SessionState::Connected, WAIT).await);

    session.shutdown();
}

#[tokio::test]
async fn test_dispatch_events_reach_subscribers() {
    let mock = MockGateway::start(45_000).await.unwrap();
    let session = GatewaySession::new(session_config(mock.url()), 0);
    let mut events = session.subscribe();
    session.connect();

    mock.wait_for_op(2, WAIT).await.expect("no identify frame");
    mock.send(ready_frame("sess-2", 1));
    mock.send(dispatch_frame(
        "MESSAGE_CREATE",
        2,
        json!({
            "id": "m1",
            "channel_id": "c1",
            "content": "hello",
            "author": {"id": "7", "username": "alice"},
        }),
    ));

    let mut saw_message = false;
    for _ in 0..2 {
        let shard_event = tokio::time::timeout(WAIT, events.recv())
            .await
            .expect("no event published")
            .expect("bus closed");
        if let Event::MessageCreate(message) = shard_event.event {
            assert_eq!(message.content, "hello");
            saw_message = true;
        }
    }
    assert!(saw_message);

    session.shutdown();
}

#[tokio::test]
async fn test_reconnect_op_triggers_resume() {
    let mock = MockGateway::start(45_000).await.unwrap();
    let session = GatewaySession::new(session_config(mock.url()), 0);
    session.connect();

    mock.wait_for_op(2, WAIT).await.expect("no identify frame");
    // point the resume endpoint back at this mock
    mock.send(dispatch_frame(
        "READY",
        3,
        json!({
            "v": 10,
            "user": {"id": "900", "username": "unicord-test", "bot": true},
            "session_id": "sess-r",
            "resume_gateway_url": mock.url(),
        }),
    ));
    assert!(wait_for_state(&session, SessionState::Connected, WAIT).await);

    mock.send(json!({"op": 7}));

    assert!(
        mock.wait_for_connections(2, RECONNECT_WAIT).await,
        "client never reconnected"
    );
    let resume = mock
        .wait_for_op(6, RECONNECT_WAIT)
        .await
        .expect("no resume frame");
    assert_eq!(resume["d"]["token"], "test-token");
    assert_eq!(resume["d"]["session_id"], "sess-r");
    assert_eq!(resume["d"]["seq"], 3);

    session.shutdown();
}
