//! # unicord-gateway
//!
//! Client-side runtime for the persistent gateway connection: the per-shard
//! session state machine (handshake, heartbeat, resume, reconnect-with-backoff)
//! and the in-process shard coordinator.

pub mod protocol;
pub mod session;
pub mod shard;

pub use protocol::{
    GatewayFrame, HelloPayload, IdentifyPayload, OpCode, ReadyApplication, ReadyPayload,
    ResumePayload,
};
pub use session::{Event, GatewaySession, SessionConfig, SessionInfo, SessionState, ShardEvent};
pub use shard::ShardCoordinator;
