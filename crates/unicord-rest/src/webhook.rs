//! One-shot webhook execution
//!
//! Webhooks carry their own credentials in the URL, so they bypass the
//! bot-token client and the route buckets entirely.

use serde_json::Value;
use tracing::debug;
use unicord_common::{Error, Result};
use unicord_core::MessagePayload;

/// POST a payload to a webhook URL
///
/// Returns the created message body when the server sends one, `None` on
/// a 204.
pub async fn execute_webhook(url: &str, payload: &MessagePayload) -> Result<Option<Value>> {
    debug!("executing webhook");
    let response = reqwest::Client::new()
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(Error::transport)?;
    crate::client::classify(response).await
}
