//! Per-route request serialization
//!
//! Every REST call is queued onto the bucket for its route key
//! (`"METHOD /path"`). A bucket is an unbounded FIFO drained by a single
//! task, so within one route requests run one at a time in submission
//! order; distinct routes never wait on each other. Buckets are created
//! lazily and live for the process lifetime.

use std::future::Future;
use std::pin::Pin;

use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use unicord_common::{Error, Result};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Route-keyed FIFO dispatcher
pub struct RateLimiter {
    buckets: DashMap<String, mpsc::UnboundedSender<Job>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Queue `op` on the bucket for `route` and wait for its result
    ///
    /// The operation runs with the bucket held, so any backoff it performs
    /// internally keeps the whole route blocked behind it.
    pub async fn enqueue<T, F, Fut>(&self, route: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let _ = result_tx.send(op().await);
        });

        self.bucket(route)
            .send(job)
            .map_err(|_| Error::transport("rate limit bucket closed"))?;

        result_rx
            .await
            .map_err(|_| Error::transport("rate limit operation dropped"))?
    }

    /// Number of live buckets
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, route: &str) -> mpsc::UnboundedSender<Job> {
        if let Some(sender) = self.buckets.get(route) {
            return sender.clone();
        }

        self.buckets
            .entry(route.to_string())
            .or_insert_with(|| {
                debug!(route, "creating rate limit bucket");
                let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
                tokio::spawn(async move {
                    while let Some(job) = rx.recv().await {
                        job.await;
                    }
                });
                tx
            })
            .clone()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
