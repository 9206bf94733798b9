use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leadfit_api::assessment::scoring::{FitScorer, QuizFitScorer};
use leadfit_api::config::Config;
use leadfit_api::relay::forwarder::HttpWebhookSink;
use leadfit_api::routes::build_router;
use leadfit_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting leadfit API v{}", env!("CARGO_PKG_VERSION"));

    let fit_scorer: Arc<dyn FitScorer> = Arc::new(QuizFitScorer);
    info!("Fit scorer initialized (backend: {})", fit_scorer.backend());

    let webhook = Arc::new(HttpWebhookSink::new(config.upstream_webhook_url.clone()));
    info!(
        "Relay mounted at {} (upstream timeout {}ms)",
        config.relay_path,
        config.upstream_timeout.as_millis()
    );

    let state = AppState {
        config: config.clone(),
        fit_scorer,
        webhook,
    };

    // Widget is embedded cross-origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("invalid listen address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
