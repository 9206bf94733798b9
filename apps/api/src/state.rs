use std::sync::Arc;

use crate::assessment::scoring::FitScorer;
use crate::config::Config;
use crate::relay::forwarder::WebhookSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable fit scorer. Default: QuizFitScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
    /// Where relayed submissions go. Default: HttpWebhookSink on UPSTREAM_WEBHOOK_URL.
    pub webhook: Arc<dyn WebhookSink>,
}
