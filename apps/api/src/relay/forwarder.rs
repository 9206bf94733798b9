//! Upstream delivery for the webhook relay.
//!
//! One attempt per incoming request, bounded by a timeout. No retries.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode};
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Upstream error: {status}")]
    Upstream { status: u16 },

    #[error("Upstream timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Upstream request failed")]
    Transport(#[source] reqwest::Error),
}

impl RelayError {
    /// Upstream rejections are a bad gateway; anything that failed locally is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Timeout { .. } | RelayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// What came back from the upstream sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body_len: usize,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Destination for relayed bodies. Carried in `AppState` as `Arc<dyn WebhookSink>`.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// `content_type` is the caller's header value, passed through byte for byte.
    async fn deliver(
        &self,
        content_type: &HeaderValue,
        body: Bytes,
    ) -> Result<UpstreamReply, RelayError>;
}

/// Posts the body to a fixed webhook URL.
#[derive(Clone)]
pub struct HttpWebhookSink {
    client: Client,
    url: String,
}

impl HttpWebhookSink {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl WebhookSink for HttpWebhookSink {
    async fn deliver(
        &self,
        content_type: &HeaderValue,
        body: Bytes,
    ) -> Result<UpstreamReply, RelayError> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, content_type.as_bytes())
            .body(body)
            .send()
            .await
            .map_err(RelayError::Transport)?;

        let status = response.status().as_u16();
        let upstream_body = response.bytes().await.map_err(RelayError::Transport)?;
        debug!("Upstream replied {} ({} bytes)", status, upstream_body.len());

        Ok(UpstreamReply {
            status,
            body_len: upstream_body.len(),
        })
    }
}

/// Forwards `body` unchanged to the sink, giving up after `timeout`.
/// The pending delivery and its timer are dropped on every exit path.
pub async fn forward(
    sink: &dyn WebhookSink,
    timeout: Duration,
    content_type: &HeaderValue,
    body: Bytes,
) -> Result<UpstreamReply, RelayError> {
    let reply = tokio::time::timeout(timeout, sink.deliver(content_type, body))
        .await
        .map_err(|_| RelayError::Timeout {
            after_ms: timeout.as_millis() as u64,
        })??;

    if !reply.is_success() {
        return Err(RelayError::Upstream {
            status: reply.status,
        });
    }
    Ok(reply)
}
