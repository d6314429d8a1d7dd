// src/api.rs
//! HTTP surface: `POST /analyze-sentiment`, `GET /health`, optional `GET /metrics`.

use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, FromRequest, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::engine::{PolarityEngine, SharedEngine};
use crate::error::{ApiError, EngineError};
use crate::metrics::Metrics;
use crate::schema::{NewsItem, SentimentResult};
use crate::sentiment;

#[derive(Clone)]
pub struct AppState {
    engine: SharedEngine,
}

impl AppState {
    pub fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &dyn PolarityEngine {
        self.engine.as_ref()
    }
}

/// JSON body extractor whose rejections become structured `ApiError`s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Router with default settings and no `/metrics`.
pub fn router(state: AppState) -> Router {
    create_router(state, &ServiceConfig::default(), None)
}

pub fn create_router(state: AppState, cfg: &ServiceConfig, metrics: Option<&Metrics>) -> Router {
    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze-sentiment", post(analyze_sentiment));

    if let Some(m) = metrics {
        app = app.merge(m.router());
    }

    let mut app = app
        .layer(DefaultBodyLimit::max(cfg.body_limit))
        .layer(TraceLayer::new_for_http());
    if cfg.cors {
        app = app.layer(CorsLayer::very_permissive());
    }
    app.with_state(state)
}

async fn analyze_sentiment(
    State(state): State<AppState>,
    ApiJson(items): ApiJson<Vec<NewsItem>>,
) -> Result<Json<Vec<SentimentResult>>, ApiError> {
    let started = Instant::now();
    let n = items.len();

    let results = score_batch(state.engine(), items)?;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    metrics::counter!("sentiment_requests_total").increment(1);
    metrics::histogram!("sentiment_batch_duration_ms").record(elapsed_ms);
    for r in &results {
        metrics::counter!("sentiment_items_total", "label" => r.label.as_str()).increment(1);
    }
    debug!(items = n, elapsed_ms, "batch scored");

    Ok(Json(results))
}

/// Score every item in input order. The first engine error aborts the batch.
pub fn score_batch(
    engine: &dyn PolarityEngine,
    items: Vec<NewsItem>,
) -> Result<Vec<SentimentResult>, EngineError> {
    items
        .into_iter()
        .map(|item| {
            let scored = sentiment::score(engine, &item.text)?;
            Ok(SentimentResult::new(item, scored))
        })
        .collect()
}
