//! Shard coordinator
//!
//! Spawns one [`GatewaySession`] per shard and merges their dispatch
//! streams onto a single broadcast bus.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::session::{GatewaySession, SessionConfig, ShardEvent};

const EVENT_BUS_CAPACITY: usize = 256;

/// Owns the sessions of a multi-shard bot
pub struct ShardCoordinator {
    config: Arc<SessionConfig>,
    events: broadcast::Sender<ShardEvent>,
    sessions: Vec<Arc<GatewaySession>>,
}

impl ShardCoordinator {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self {
            config: Arc::new(config),
            events,
            sessions: Vec::new(),
        }
    }

    /// Create and connect sessions for shards `0..count`
    ///
    /// Each session identifies with `[shard_id, count]` and publishes onto
    /// the shared bus.
    pub fn spawn(&mut self, count: u16) {
        info!(shard_count = count, "spawning gateway shards");
        // identify must carry the spawned count, whatever the constructor saw
        let config = if self.config.shard_count == count {
            Arc::clone(&self.config)
        } else {
            let mut derived = (*self.config).clone();
            derived.shard_count = count;
            Arc::new(derived)
        };
        for shard_id in 0..count {
            let session = Arc::new(GatewaySession::with_bus(
                Arc::clone(&config),
                shard_id,
                self.events.clone(),
            ));
            session.connect();
            self.sessions.push(session);
        }
    }

    /// Subscribe to the merged event stream of all shards
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ShardEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn sessions(&self) -> &[Arc<GatewaySession>] {
        &self.sessions
    }

    /// Stop every session
    pub fn shutdown(&mut self) {
        for session in self.sessions.drain(..) {
            session.shutdown();
        }
    }
}

impl Drop for ShardCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
