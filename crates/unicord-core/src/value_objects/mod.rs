//! Value objects: bitflag types shared across the gateway and REST layers

mod intents;
mod permissions;

pub use intents::Intents;
pub use permissions::{Permissions, PermissionsParseError};
