//! Relay client: posts a contact submission to the relay endpoint.
//!
//! Mirrors what the browser does: one JSON POST, no retries, and the relay's
//! `error` field surfaced verbatim when the call is rejected.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::contact::models::ContactPayload;
use crate::relay::models::RelayResponse;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The relay answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Something went wrong. Please try again.")]
    Network(#[source] reqwest::Error),
}

/// Acknowledgement of a delivered submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAck {
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Where the form controller sends payloads.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: &ContactPayload) -> Result<SubmitAck, SubmitError>;
}

#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: String) -> Self {
        Self {
            client: Client::new(),
            relay_url,
        }
    }
}

#[async_trait]
impl SubmissionSink for RelayClient {
    async fn submit(&self, payload: &ContactPayload) -> Result<SubmitAck, SubmitError> {
        let response = self
            .client
            .post(&self.relay_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!("Relay unreachable: {e}");
                SubmitError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let fallback = format!("Webhook error: {}", status.as_u16());
            // Fall back to the status when the body carries no usable message.
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(fallback);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let ack = response.json::<RelayResponse>().await.ok();
        let request_id = ack.and_then(|r| r.request_id);
        debug!("Submission relayed (request_id: {:?})", request_id);

        Ok(SubmitAck { request_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::assessment::models::Selections;
    use crate::assessment::scoring::compute_fit_assessment;
    use crate::contact::models::{ContactForm, NeedId};

    async fn spawn_relay(status: StatusCode, body: &'static str) -> SocketAddr {
        let app = Router::new().route(
            "/api/webhook",
            post(move |Json(_): Json<Value>| async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn payload() -> ContactPayload {
        let selections = Selections {
            communication: "slack".to_string(),
            logs: vec!["elk".to_string()],
            ..Default::default()
        };
        let form = ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            needs: vec![NeedId::Other],
            comments: String::new(),
            terms_accepted: true,
        };
        ContactPayload::build(
            &form,
            &selections,
            &compute_fit_assessment(&selections),
            Utc::now(),
            "/try-it-out",
        )
    }

    fn client_for(addr: SocketAddr) -> RelayClient {
        RelayClient::new(format!("http://{addr}/api/webhook"))
    }

    #[tokio::test]
    async fn test_success_returns_request_id() {
        let addr = spawn_relay(StatusCode::OK, r#"{"ok":true,"requestId":"abc"}"#).await;
        let ack = client_for(addr).submit(&payload()).await.unwrap();
        assert_eq!(ack.request_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_relay_error_field() {
        let addr = spawn_relay(
            StatusCode::BAD_GATEWAY,
            r#"{"ok":false,"error":"Upstream error: 500"}"#,
        )
        .await;
        let err = client_for(addr).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 502, .. }));
        assert_eq!(err.to_string(), "Upstream error: 500");
    }

    #[tokio::test]
    async fn test_rejection_without_json_uses_status() {
        let addr = spawn_relay(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
        let err = client_for(addr).submit(&payload()).await.unwrap_err();
        assert_eq!(err.to_string(), "Webhook error: 500");
    }

    #[tokio::test]
    async fn test_blank_error_field_uses_status() {
        let addr = spawn_relay(StatusCode::BAD_GATEWAY, r#"{"ok":false,"error":""}"#).await;
        let err = client_for(addr).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 502, .. }));
        assert_eq!(err.to_string(), "Webhook error: 502");
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_generic_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn test_sends_json_payload() {
        let app = Router::new().route(
            "/api/webhook",
            post(|Json(body): Json<Value>| async move {
                let ok = body["fit"]["level"] == "minimal" && body["needs"][0]["id"] == "other";
                let status = if ok {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                };
                (status, Json(json!({ "ok": ok })))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        assert!(client_for(addr).submit(&payload()).await.is_ok());
    }
}
