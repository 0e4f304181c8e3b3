//! Integration test utilities for the bot runtime
//!
//! This crate provides a mock in-process gateway server plus fixture
//! builders for driving sessions and the dispatch pipeline end to end.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
