//! Error types

mod runtime_error;

pub use runtime_error::{Error, Result};
