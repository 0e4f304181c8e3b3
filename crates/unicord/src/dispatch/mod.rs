//! Event routing: contexts, registries, middleware and the pipeline

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod registry;
pub mod tokenizer;

pub use context::{ComponentContext, DispatchContext, InteractionContext, MessageContext};
pub use middleware::{HandlerResult, Middleware, Next};
pub use pipeline::Pipeline;
pub use registry::HandlerRegistry;
pub use tokenizer::tokenize;
