//! Gateway wire protocol
//!
//! JSON frames `{op, d, s?, t?}` exchanged over the WebSocket connection.

mod frames;
mod opcodes;
mod payloads;

pub use frames::GatewayFrame;
pub use opcodes::OpCode;
pub use payloads::{
    ConnectionProperties, HelloPayload, IdentifyPayload, ReadyApplication, ReadyPayload,
    ResumePayload,
};
