//! News Sentiment Service — Shuttle entrypoint
//! Boots the Axum HTTP server with the shared polarity engine.
//!
//! For a plain Tokio server see `src/bin/serve.rs`.

use news_sentiment_service::{build_app, telemetry, ServiceConfig};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let cfg = ServiceConfig::load()?;
    telemetry::init_tracing(cfg.log_format);

    // Engine failures abort startup here.
    let router = build_app(&cfg)?;

    Ok(router.into())
}
