//! Middleware chain
//!
//! Middleware wrap handler execution onion-style in registration order.
//! Each layer receives the context and a [`Next`] continuation; not
//! calling `next` halts the chain and the handler never runs.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::dispatch::context::DispatchContext;

/// Result type for handlers and middleware
pub type HandlerResult = anyhow::Result<()>;

/// A middleware layer
pub type Middleware =
    Arc<dyn Fn(DispatchContext, Next) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// The innermost step of a chain, usually the matched handler
pub type Terminal = Arc<dyn Fn(DispatchContext) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Continuation pointing at the rest of the chain
///
/// Holds the shared layer slice and an explicit cursor; advancing is a
/// cheap index bump, no per-call closure allocation.
pub struct Next {
    chain: Arc<[Middleware]>,
    index: usize,
    terminal: Terminal,
}

impl Next {
    #[must_use]
    pub(crate) fn new(chain: Arc<[Middleware]>, terminal: Terminal) -> Self {
        Self {
            chain,
            index: 0,
            terminal,
        }
    }

    /// Invoke the next layer, or the terminal once layers are exhausted
    pub fn run(self, ctx: DispatchContext) -> BoxFuture<'static, HandlerResult> {
        match self.chain.get(self.index) {
            Some(layer) => {
                let layer = Arc::clone(layer);
                let next = Self {
                    chain: self.chain,
                    index: self.index + 1,
                    terminal: self.terminal,
                };
                layer(ctx, next)
            }
            None => (self.terminal)(ctx),
        }
    }
}

/// Run `ctx` through `chain` ending in `terminal`
pub(crate) async fn run_chain(
    chain: Arc<[Middleware]>,
    terminal: Terminal,
    ctx: DispatchContext,
) -> HandlerResult {
    Next::new(chain, terminal).run(ctx).await
}
