pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers::handle_assess;
use crate::contact::handlers::handle_contact_gate;
use crate::relay::handlers::handle_relay;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let relay_path = state.config.relay_path.clone();

    Router::new()
        .route("/health", get(health::health_handler))
        // Widget API
        .route("/api/v1/assessment", post(handle_assess))
        .route("/api/v1/contact/gate", post(handle_contact_gate))
        // Webhook relay
        .route(&relay_path, post(handle_relay))
        .with_state(state)
}
