// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod schema;
pub mod sentiment;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::config::ServiceConfig;
pub use crate::engine::{PolarityEngine, PolarityScores, SharedEngine};
pub use crate::schema::{NewsItem, SentimentResult};
pub use crate::sentiment::SentimentLabel;

use anyhow::Context;
use axum::Router;
use tracing::info;

/// Build the full router from an explicit config.
///
/// The engine is constructed and warmed up here, once. Any failure is
/// returned so the caller never starts serving without a working engine.
pub fn build_app(cfg: &ServiceConfig) -> anyhow::Result<Router> {
    let engine = engine::build_engine(&cfg.engine).context("initializing sentiment engine")?;
    engine::warm_up(engine.as_ref()).context("warming up sentiment engine")?;

    let metrics = if cfg.metrics {
        Some(crate::metrics::Metrics::init(cfg.body_limit)?)
    } else {
        None
    };

    info!(
        engine = engine.name(),
        metrics = cfg.metrics,
        cors = cfg.cors,
        body_limit = cfg.body_limit,
        "sentiment service configured"
    );

    Ok(api::create_router(
        AppState::new(engine),
        cfg,
        metrics.as_ref(),
    ))
}

/// Load config from env/file and build the router.
///
/// ```ignore
/// let router = news_sentiment_service::app().await?;
/// ```
pub async fn app() -> anyhow::Result<Router> {
    let cfg = ServiceConfig::load()?;
    build_app(&cfg)
}
