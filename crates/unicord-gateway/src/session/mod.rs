//! Gateway session management
//!
//! A session owns one websocket connection to the gateway, keeps it
//! alive with heartbeats, and reconnects (resuming where possible)
//! when the connection drops.

pub mod events;
pub mod session;
pub mod state;

pub use events::{Event, ShardEvent};
pub use session::{GatewaySession, SessionConfig};
pub use state::{SessionInfo, SessionState};
