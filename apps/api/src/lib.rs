//! Lead-qualification widget backend: quiz fit scoring, contact-form gating,
//! and the webhook relay that forwards submissions to a third-party endpoint.

pub mod assessment;
pub mod config;
pub mod contact;
pub mod errors;
pub mod relay;
pub mod routes;
pub mod state;
pub mod widget;
