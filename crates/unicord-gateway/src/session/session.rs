//! Gateway session driver
//!
//! [`GatewaySession`] is the public handle for one shard's connection.
//! Calling [`GatewaySession::connect`] spawns a driver task that owns the
//! websocket and runs forever: connect, handshake, pump frames, and on any
//! drop reconnect with exponential backoff, resuming the old session when
//! the server still remembers it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};
use unicord_common::{Error, Result};
use unicord_core::Intents;

use crate::protocol::{
    ConnectionProperties, GatewayFrame, IdentifyPayload, OpCode, ResumePayload,
};
use crate::session::events::{Event, ShardEvent};
use crate::session::state::{reconnect_delay, SessionInfo, SessionState};

/// Event bus capacity; slow subscribers start lagging past this
const EVENT_BUS_CAPACITY: usize = 256;

/// Wait applied after the server invalidates a session, before
/// identifying again on the same connection
const INVALID_SESSION_WAIT: Duration = Duration::from_secs(5);

/// Connection parameters for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub token: String,
    pub intents: Intents,
    pub gateway_url: String,
    pub shard_count: u16,
}

/// Handle to one shard's gateway connection
pub struct GatewaySession {
    config: Arc<SessionConfig>,
    shard_id: u16,
    events: broadcast::Sender<ShardEvent>,
    state: Arc<watch::Sender<SessionState>>,
    state_rx: watch::Receiver<SessionState>,
    info: Arc<watch::Sender<Option<SessionInfo>>>,
    info_rx: watch::Receiver<Option<SessionInfo>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl GatewaySession {
    /// Create a session with its own event bus
    #[must_use]
    pub fn new(config: SessionConfig, shard_id: u16) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self::with_bus(Arc::new(config), shard_id, events)
    }

    /// Create a session publishing onto a shared event bus
    #[must_use]
    pub fn with_bus(
        config: Arc<SessionConfig>,
        shard_id: u16,
        events: broadcast::Sender<ShardEvent>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(SessionState::Disconnected);
        let (info_tx, info_rx) = watch::channel(None);
        Self {
            config,
            shard_id,
            events,
            state: Arc::new(state_tx),
            state_rx,
            info: Arc::new(info_tx),
            info_rx,
            task: Mutex::new(None),
        }
    }

    /// Subscribe to decoded dispatch events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ShardEvent> {
        self.events.subscribe()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    /// Watch channel for lifecycle transitions
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Current resume descriptor, if the session has seen a Ready
    #[must_use]
    pub fn session_info(&self) -> Option<SessionInfo> {
        self.info_rx.borrow().clone()
    }

    /// Watch channel for resume descriptor replacements
    #[must_use]
    pub fn watch_info(&self) -> watch::Receiver<Option<SessionInfo>> {
        self.info_rx.clone()
    }

    #[must_use]
    pub fn shard_id(&self) -> u16 {
        self.shard_id
    }

    /// Connection parameters this session identifies with
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Spawn the connection driver
    ///
    /// Idempotent; a second call while the driver is running is a no-op.
    pub fn connect(&self) {
        let mut task = self.task.lock();
        if task.is_some() {
            return;
        }

        let mut driver = SessionDriver {
            config: Arc::clone(&self.config),
            shard_id: self.shard_id,
            events: self.events.clone(),
            state: Arc::clone(&self.state),
            published_info: Arc::clone(&self.info),
            info: None,
            attempts: 0,
        };
        *task = Some(tokio::spawn(async move {
            driver.run().await;
        }));
    }

    /// Stop the driver and drop the connection
    pub fn shutdown(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        self.state.send_replace(SessionState::Disconnected);
    }
}

impl Drop for GatewaySession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Whether the read loop keeps going after a frame
enum Flow {
    Continue,
    Reconnect,
}

/// Last-seen dispatch sequence, shared with the heartbeat task
///
/// Folds with max so a replayed or reordered frame can never move the
/// sequence backwards. Negative means no dispatch seen yet.
struct Sequence(AtomicI64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI64::new(-1))
    }

    fn fold(&self, seq: u64) {
        let seq = i64::try_from(seq).unwrap_or(i64::MAX);
        self.0.fetch_max(seq, Ordering::SeqCst);
    }

    fn current(&self) -> Option<u64> {
        let v = self.0.load(Ordering::SeqCst);
        u64::try_from(v).ok()
    }

    fn clear(&self) {
        self.0.store(-1, Ordering::SeqCst);
    }
}

/// Per-connection plumbing: the outbound queue and the heartbeat task
struct ActiveConnection {
    out: mpsc::UnboundedSender<GatewayFrame>,
    seq: Arc<Sequence>,
    heartbeat: Option<JoinHandle<()>>,
}

impl ActiveConnection {
    fn new(out: mpsc::UnboundedSender<GatewayFrame>) -> Self {
        Self {
            out,
            seq: Arc::new(Sequence::new()),
            heartbeat: None,
        }
    }

    fn send(&self, frame: GatewayFrame) {
        let _ = self.out.send(frame);
    }

    /// (Re)start the heartbeat task; at most one runs per connection
    fn start_heartbeat(&mut self, interval: Duration) {
        self.stop_heartbeat();
        let out = self.out.clone();
        let seq = Arc::clone(&self.seq);
        self.heartbeat = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick of interval() completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if out.send(GatewayFrame::heartbeat(seq.current())).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_heartbeat(&mut self) {
        if let Some(task) = self.heartbeat.take() {
            task.abort();
        }
    }
}

impl Drop for ActiveConnection {
    fn drop(&mut self) {
        self.stop_heartbeat();
    }
}

/// State machine behind a [`GatewaySession`]
struct SessionDriver {
    config: Arc<SessionConfig>,
    shard_id: u16,
    events: broadcast::Sender<ShardEvent>,
    state: Arc<watch::Sender<SessionState>>,
    /// Mirror of the descriptor for [`GatewaySession::watch_info`] observers
    published_info: Arc<watch::Sender<Option<SessionInfo>>>,
    /// Resume descriptor from the last successful Ready
    info: Option<SessionInfo>,
    /// Consecutive failed connections, reset on Ready/Resumed
    attempts: u32,
}

impl SessionDriver {
    async fn run(&mut self) {
        loop {
            self.set_state(SessionState::Connecting);
            if let Err(error) = self.run_connection().await {
                warn!(shard = self.shard_id, %error, "gateway connection failed");
            }
            self.set_state(SessionState::Disconnected);

            let delay = reconnect_delay(self.attempts);
            self.attempts = self.attempts.saturating_add(1);
            debug!(
                shard = self.shard_id,
                delay_ms = delay.as_millis() as u64,
                "reconnecting after backoff"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Run one websocket connection to completion
    ///
    /// Returns `Ok(())` when the connection ended in a way that calls for
    /// a plain reconnect, `Err` on transport failures.
    async fn run_connection(&mut self) -> Result<()> {
        let url = self.connect_url();
        debug!(shard = self.shard_id, %url, "connecting to gateway");

        let (ws, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(Error::transport)?;
        let (mut sink, mut stream) = ws.split();

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<GatewayFrame>();
        let writer = tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                let Ok(text) = frame.to_json() else { continue };
                if sink.send(WsMessage::Text(text)).await.is_err() {
                    break;
                }
            }
        });

        self.set_state(SessionState::AwaitingHello);
        let mut conn = ActiveConnection::new(out_tx);

        let result = loop {
            let Some(msg) = stream.next().await else {
                break Ok(());
            };
            let msg = match msg {
                Ok(msg) => msg,
                Err(error) => break Err(Error::transport(error)),
            };
            let text = match msg {
                WsMessage::Text(text) => text,
                WsMessage::Close(frame) => {
                    info!(shard = self.shard_id, ?frame, "gateway closed connection");
                    break Ok(());
                }
                _ => continue,
            };
            let frame = match GatewayFrame::from_json(&text) {
                Ok(frame) => frame,
                Err(error) => {
                    warn!(shard = self.shard_id, %error, "malformed gateway frame");
                    break Ok(());
                }
            };
            match self.handle_frame(frame, &mut conn).await {
                Flow::Continue => {}
                Flow::Reconnect => break Ok(()),
            }
        };

        conn.stop_heartbeat();
        writer.abort();
        result
    }

    async fn handle_frame(&mut self, frame: GatewayFrame, conn: &mut ActiveConnection) -> Flow {
        if let Some(seq) = frame.s {
            conn.seq.fold(seq);
            if let Some(info) = &mut self.info {
                info.seq = conn.seq.current();
            }
        }

        match frame.op {
            OpCode::Hello => {
                let Some(hello) = frame.as_hello() else {
                    warn!(shard = self.shard_id, "hello frame without payload");
                    return Flow::Reconnect;
                };
                self.send_handshake(conn);
                conn.start_heartbeat(Duration::from_millis(hello.heartbeat_interval));
                Flow::Continue
            }
            OpCode::Dispatch => {
                self.handle_dispatch(frame, conn);
                Flow::Continue
            }
            OpCode::Heartbeat => {
                // server asked for an immediate beat
                conn.send(GatewayFrame::heartbeat(conn.seq.current()));
                Flow::Continue
            }
            OpCode::HeartbeatAck => Flow::Continue,
            OpCode::Reconnect => {
                info!(shard = self.shard_id, "server requested reconnect");
                Flow::Reconnect
            }
            OpCode::InvalidSession => {
                warn!(shard = self.shard_id, "session invalidated, re-identifying");
                self.info = None;
                self.published_info.send_replace(None);
                conn.seq.clear();
                tokio::time::sleep(INVALID_SESSION_WAIT).await;
                self.set_state(SessionState::Identifying);
                conn.send(GatewayFrame::identify(&self.identify_payload()));
                Flow::Continue
            }
            // client-to-server ops; ignore if they ever arrive
            OpCode::Identify | OpCode::Resume => Flow::Continue,
        }
    }

    fn handle_dispatch(&mut self, frame: GatewayFrame, conn: &ActiveConnection) {
        let Some(name) = frame.t else { return };
        let event = Event::decode(&name, frame.d.unwrap_or(Value::Null));

        match &event {
            Event::Ready(ready) => {
                if let Some(resume_url) = &ready.resume_gateway_url {
                    self.info = Some(SessionInfo {
                        session_id: ready.session_id.clone(),
                        resume_url: resume_url.clone(),
                        seq: conn.seq.current(),
                    });
                    self.published_info.send_replace(self.info.clone());
                }
                self.attempts = 0;
                self.set_state(SessionState::Connected);
                info!(
                    shard = self.shard_id,
                    session_id = %ready.session_id,
                    user = %ready.user.username,
                    "gateway session ready"
                );
            }
            Event::Resumed => {
                self.attempts = 0;
                self.set_state(SessionState::Connected);
                info!(shard = self.shard_id, "gateway session resumed");
            }
            _ => {}
        }

        let _ = self.events.send(ShardEvent {
            shard_id: self.shard_id,
            event,
        });
    }

    /// Send Resume when we hold a descriptor, Identify otherwise
    fn send_handshake(&mut self, conn: &ActiveConnection) {
        if let Some(info) = self.info.clone() {
            self.set_state(SessionState::Resuming);
            debug!(shard = self.shard_id, session_id = %info.session_id, "resuming session");
            conn.send(GatewayFrame::resume(&ResumePayload {
                token: self.config.token.clone(),
                session_id: info.session_id,
                seq: info.seq,
            }));
        } else {
            self.set_state(SessionState::Identifying);
            conn.send(GatewayFrame::identify(&self.identify_payload()));
        }
    }

    fn identify_payload(&self) -> IdentifyPayload {
        IdentifyPayload {
            token: self.config.token.clone(),
            intents: self.config.intents,
            properties: ConnectionProperties::default(),
            shard: [self.shard_id, self.config.shard_count],
        }
    }

    fn connect_url(&self) -> String {
        match &self.info {
            Some(info) => format!("{}/?v=10&encoding=json", info.resume_url.trim_end_matches('/')),
            None => self.config.gateway_url.clone(),
        }
    }

    fn set_state(&self, state: SessionState) {
        self.state.send_replace(state);
    }
}
