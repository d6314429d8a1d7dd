//! Plain Tokio server on `bind_addr`, without the Shuttle runtime.

use anyhow::Context;
use news_sentiment_service::{build_app, telemetry, ServiceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cfg = ServiceConfig::load()?;
    telemetry::init_tracing(cfg.log_format);

    let app = build_app(&cfg)?;

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    info!(addr = %cfg.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
