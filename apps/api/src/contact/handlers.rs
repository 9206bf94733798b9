//! Axum route handlers for the Contact API.

use axum::Json;

use crate::contact::models::ContactForm;
use crate::contact::validation::{evaluate_contact_gate, ContactGate};
use crate::errors::ApiJson;

/// POST /api/v1/contact/gate
///
/// Reports whether the contact form may be submitted and, if not, what is missing.
pub async fn handle_contact_gate(ApiJson(form): ApiJson<ContactForm>) -> Json<ContactGate> {
    Json(evaluate_contact_gate(&form))
}
