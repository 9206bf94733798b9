use serde::{Deserialize, Serialize};

/// Normalized relay reply: `{ok, error?, requestId?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl RelayResponse {
    pub fn delivered(request_id: String) -> Self {
        RelayResponse {
            ok: true,
            error: None,
            request_id: Some(request_id),
        }
    }

    pub fn failed(error: String, request_id: String) -> Self {
        RelayResponse {
            ok: false,
            error: Some(error),
            request_id: Some(request_id),
        }
    }
}
