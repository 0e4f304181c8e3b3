//! Test helpers for integration tests
//!
//! Provides a mock gateway server: a real WebSocket listener that speaks
//! the wire protocol from the server side, records every frame the client
//! sends, and injects frames on demand.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

/// Instruction to the currently connected client
enum ServerCommand {
    /// Send a frame to the client
    Frame(Value),
    /// Drop the connection
    Close,
}

/// In-process gateway server for driving real sessions
///
/// Accepts connections one at a time; every new connection is greeted with
/// a Hello frame, so reconnect flows can be exercised against it.
pub struct MockGateway {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
    connections: Arc<Mutex<u32>>,
    commands: mpsc::UnboundedSender<ServerCommand>,
    handle: JoinHandle<()>,
}

impl MockGateway {
    /// Start the mock with a given heartbeat interval in milliseconds
    pub async fn start(heartbeat_interval: u64) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let received = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(Mutex::new(0u32));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let command_rx = Arc::new(AsyncMutex::new(command_rx));

        let recorder = Arc::clone(&received);
        let conn_counter = Arc::clone(&connections);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let Ok(mut ws) = accept_async(stream).await else {
                    continue;
                };
                *conn_counter.lock().unwrap() += 1;

                let hello = serde_json::json!({
                    "op": 10,
                    "d": {"heartbeat_interval": heartbeat_interval},
                });
                if ws.send(WsMessage::Text(hello.to_string())).await.is_err() {
                    continue;
                }

                let mut command_rx = command_rx.lock().await;
                loop {
                    tokio::select! {
                        command = command_rx.recv() => {
                            match command {
                                Some(ServerCommand::Frame(frame)) => {
                                    if ws.send(WsMessage::Text(frame.to_string())).await.is_err() {
                                        break;
                                    }
                                }
                                Some(ServerCommand::Close) | None => {
                                    let _ = ws.close(None).await;
                                    break;
                                }
                            }
                        }
                        message = ws.next() => {
                            match message {
                                Some(Ok(WsMessage::Text(text))) => {
                                    if let Ok(frame) = serde_json::from_str::<Value>(&text) {
                                        recorder.lock().unwrap().push(frame);
                                    }
                                }
                                Some(Ok(WsMessage::Close(_))) | Some(Err(_)) | None => break,
                                Some(Ok(_)) => {}
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            connections,
            commands: command_tx,
            handle,
        })
    }

    /// Gateway URL for session configuration
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Send a frame to the connected client
    pub fn send(&self, frame: Value) {
        let _ = self.commands.send(ServerCommand::Frame(frame));
    }

    /// Drop the current connection
    pub fn close_connection(&self) {
        let _ = self.commands.send(ServerCommand::Close);
    }

    /// Snapshot of every frame received so far
    pub fn frames(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    /// How many connections have been accepted
    pub fn connection_count(&self) -> u32 {
        *self.connections.lock().unwrap()
    }

    /// Wait until a received frame matches `predicate`
    pub async fn wait_for<F>(&self, timeout: Duration, predicate: F) -> Option<Value>
    where
        F: Fn(&Value) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Some(frame) = self
                .received
                .lock()
                .unwrap()
                .iter()
                .find(|frame| predicate(frame))
                .cloned()
            {
                return Some(frame);
            }
            if tokio::time::Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Wait for the first frame with the given opcode
    pub async fn wait_for_op(&self, op: u64, timeout: Duration) -> Option<Value> {
        self.wait_for(timeout, |frame| frame["op"] == op).await
    }

    /// Wait until `count` connections have been accepted
    pub async fn wait_for_connections(&self, count: u32, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.connection_count() >= count {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
