//! Axum handler for the webhook relay.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use crate::relay::forwarder::{forward, RelayError};
use crate::relay::models::RelayResponse;
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// POST <relay-path>
///
/// Forwards the raw body and its content type to the configured upstream webhook.
/// 200 on upstream success, 502 on upstream rejection, 500 on timeout or transport failure.
pub async fn handle_relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<RelayResponse>) {
    let request_id = Uuid::new_v4().to_string();
    let started_at = Instant::now();

    // Opaque bytes; only an absent header falls back to the default.
    let content_type = headers
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

    let result = forward(
        state.webhook.as_ref(),
        state.config.upstream_timeout,
        &content_type,
        body,
    )
    .await;
    let elapsed_ms = started_at.elapsed().as_millis() as u64;

    match result {
        Ok(reply) => {
            info!(
                request_id = %request_id,
                upstream_status = reply.status,
                upstream_bytes = reply.body_len,
                elapsed_ms,
                "Relayed submission"
            );
            (StatusCode::OK, Json(RelayResponse::delivered(request_id)))
        }
        Err(e) => {
            match &e {
                RelayError::Upstream { status } => error!(
                    request_id = %request_id,
                    elapsed_ms,
                    "Upstream error {status}"
                ),
                other => error!(
                    request_id = %request_id,
                    elapsed_ms,
                    "Relay request failed: {other:?}"
                ),
            }
            (
                e.status_code(),
                Json(RelayResponse::failed(e.to_string(), request_id)),
            )
        }
    }
}
