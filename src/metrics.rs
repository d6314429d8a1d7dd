// src/metrics.rs
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// The global recorder can only be installed once per process.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (first call only) and expose a static
    /// gauge for the configured body limit.
    pub fn init(body_limit: usize) -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                // Use default buckets to avoid API differences across crate versions.
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
                describe_counter!(
                    "sentiment_requests_total",
                    "Accepted /analyze-sentiment batches."
                );
                describe_counter!("sentiment_items_total", "Scored items by label.");
                describe_counter!("sentiment_rejected_total", "Rejected request bodies.");
                describe_histogram!(
                    "sentiment_batch_duration_ms",
                    "Batch scoring time in milliseconds."
                );
                describe_gauge!("sentiment_body_limit_bytes", "Configured body limit.");
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();

        gauge!("sentiment_body_limit_bytes").set(body_limit as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
