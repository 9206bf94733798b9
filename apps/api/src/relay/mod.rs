// Webhook relay: forwards contact submissions to the configured upstream webhook.
// Stateless; one forward attempt per request, bounded by UPSTREAM_TIMEOUT_MS.

pub mod forwarder;
pub mod handlers;
pub mod models;
