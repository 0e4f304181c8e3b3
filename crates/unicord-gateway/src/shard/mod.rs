//! In-process shard management

pub mod coordinator;

pub use coordinator::ShardCoordinator;
