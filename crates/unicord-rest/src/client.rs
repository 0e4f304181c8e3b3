//! HTTP request dispatcher
//!
//! All requests funnel through the [`RateLimiter`], one route at a time.
//! Transient failures (429 and 5xx) are retried inside the queued
//! operation, so a backing-off request keeps its route blocked until it
//! resolves.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use unicord_common::{Error, Result};
use unicord_core::{FileData, MessagePayload};

use crate::ratelimit::RateLimiter;

/// Total tries per request, the first included
const MAX_ATTEMPTS: u32 = 3;

/// Rate-limited REST client
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl RestClient {
    #[must_use]
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into(),
            limiter: Arc::new(RateLimiter::new()),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Option<Value>> {
        self.request(Method::PUT, path, body).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::DELETE, path, None).await
    }

    /// Multipart POST: a `payload_json` part plus one `files[n]` part per file
    pub async fn post_form(
        &self,
        path: &str,
        payload: &MessagePayload,
        files: Vec<FileData>,
    ) -> Result<Option<Value>> {
        let route = format!("POST {path}");
        let url = format!("{}{path}", self.base_url);
        let payload_json = serde_json::to_string(payload)?;
        let http = self.http.clone();
        let token = self.token.clone();

        self.limiter
            .enqueue(&route, move || async move {
                with_retry(|| {
                    let form = build_form(&payload_json, &files);
                    let request = http
                        .post(&url)
                        .header("Authorization", format!("Bot {token}"))
                        .multipart(form);
                    async move {
                        let response = request.send().await.map_err(Error::transport)?;
                        classify(response).await
                    }
                })
                .await
            })
            .await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let route = format!("{method} {path}");
        let url = format!("{}{path}", self.base_url);
        let http = self.http.clone();
        let token = self.token.clone();
        debug!(%route, "queueing request");

        self.limiter
            .enqueue(&route, move || async move {
                with_retry(|| {
                    let mut request = http
                        .request(method.clone(), &url)
                        .header("Authorization", format!("Bot {token}"));
                    if let Some(body) = &body {
                        request = request.json(body);
                    }
                    async move {
                        let response = request.send().await.map_err(Error::transport)?;
                        classify(response).await
                    }
                })
                .await
            })
            .await
    }
}

fn build_form(payload_json: &str, files: &[FileData]) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new().text("payload_json", payload_json.to_string());
    for (index, file) in files.iter().enumerate() {
        let mut part =
            reqwest::multipart::Part::bytes(file.data.clone()).file_name(file.name.clone());
        if let Some(content_type) = &file.content_type {
            if let Ok(with_mime) = part.mime_str(content_type) {
                part = with_mime;
            } else {
                part = reqwest::multipart::Part::bytes(file.data.clone())
                    .file_name(file.name.clone());
            }
        }
        form = form.part(format!("files[{index}]"), part);
    }
    form
}

/// Run `op` up to [`MAX_ATTEMPTS`] times, sleeping between retryable failures
pub(crate) async fn with_retry<T, F, Fut>(mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt + 1 < MAX_ATTEMPTS => {
                let delay = retry_delay(&error, attempt);
                warn!(%error, attempt, delay_ms = delay.as_millis() as u64, "retrying request");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Honor the server's `retry_after` hint, else exponential backoff
fn retry_delay(error: &Error, attempt: u32) -> Duration {
    match error.retry_after() {
        Some(seconds) if seconds >= 0.0 => Duration::from_secs_f64(seconds),
        _ => Duration::from_millis(1000u64 << attempt.min(16)),
    }
}

/// Map a response to the dispatcher's result contract
pub(crate) async fn classify(response: reqwest::Response) -> Result<Option<Value>> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    if status.is_success() {
        let text = response.text().await.map_err(Error::transport)?;
        if text.is_empty() {
            return Ok(None);
        }
        return Ok(Some(serde_json::from_str(&text)?));
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        let header_hint = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<f64>().ok());
        let body: Option<Value> = response.json().await.ok();
        let retry_after = body
            .as_ref()
            .and_then(|body| body["retry_after"].as_f64())
            .or(header_hint);
        return Err(Error::RateLimited { retry_after });
    }
    if status.is_server_error() {
        return Err(Error::Server {
            status: status.as_u16(),
        });
    }

    let body = response.text().await.ok().filter(|text| !text.is_empty());
    Err(Error::Request {
        status: status.as_u16(),
        body,
    })
}

/// Percent-encode a path segment (RFC 3986 unreserved set kept literal)
pub(crate) fn encode_segment(segment: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_retry_honors_rate_limit_hint_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let value: u32 = with_retry(move || {
            let calls = Arc::clone(&counter);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(Error::RateLimited {
                        retry_after: Some(0.5),
                    })
                } else {
                    Ok(9)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_three_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let error = with_retry::<u32, _, _>(move || {
            let calls = Arc::clone(&counter);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Server { status: 502 })
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(error, Error::Server { status: 502 }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let error = with_retry::<u32, _, _>(move || {
            let calls = Arc::clone(&counter);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::Request {
                    status: 403,
                    body: None,
                })
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(error, Error::Request { status: 403, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_delay_backs_off_exponentially() {
        let error = Error::Server { status: 500 };
        assert_eq!(retry_delay(&error, 0), Duration::from_millis(1000));
        assert_eq!(retry_delay(&error, 1), Duration::from_millis(2000));
        assert_eq!(retry_delay(&error, 2), Duration::from_millis(4000));
    }

    #[test]
    fn test_retry_delay_uses_server_hint() {
        let error = Error::RateLimited {
            retry_after: Some(1.5),
        };
        assert_eq!(retry_delay(&error, 0), Duration::from_secs_f64(1.5));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("abc-123_~."), "abc-123_~.");
        assert_eq!(encode_segment("👍"), "%F0%9F%91%8D");
        assert_eq!(encode_segment("a b"), "a%20b");
    }
}
