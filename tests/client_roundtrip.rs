// tests/client_roundtrip.rs
//
// SentimentClient against a live server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use news_sentiment_service::client::{merge_same_timestamp, SentimentClient};
use news_sentiment_service::engine::{build_engine, PolarityEngine, PolarityScores};
use news_sentiment_service::error::EngineError;
use news_sentiment_service::{api, AppState, NewsItem, SentimentLabel};

async fn spawn_server() -> SocketAddr {
    let app = api::router(AppState::new(build_engine("vader").unwrap()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn item(ts: &str, stock: &str, text: &str) -> NewsItem {
    NewsItem {
        timestamp: ts.into(),
        stock: stock.into(),
        text: text.into(),
    }
}

#[tokio::test]
async fn client_round_trips_a_batch() {
    let addr = spawn_server().await;
    let client = SentimentClient::new(&format!("http://{addr}")).unwrap();

    let items = vec![
        item("t1", "AAPL", "Great quarter, profits soar!"),
        item("t2", "TSLA", ""),
    ];
    let out = client.analyze(&items).await.expect("analyze");

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].stock, "AAPL");
    assert_eq!(out[0].label, SentimentLabel::Positive);
    assert_eq!(out[1].timestamp, "t2");
    assert_eq!(out[1].label, SentimentLabel::Neutral);
    assert_eq!(out[1].compound(), Some(0.0));
}

#[tokio::test]
async fn client_scores_merged_batch() {
    let addr = spawn_server().await;
    let client = SentimentClient::new(&format!("http://{addr}/")).unwrap();

    let merged = merge_same_timestamp(vec![
        item("t1", "NVDA", "Record revenue."),
        item("t1", "NVDA", "Analysts are thrilled."),
        item("t1", "AMD", "Guidance disappoints."),
    ]);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].text, "Record revenue. Analysts are thrilled.");

    let out = client.analyze(&merged).await.expect("analyze");
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].stock, "NVDA");
    assert_eq!(out[1].stock, "AMD");
}

struct AlwaysFails;

impl PolarityEngine for AlwaysFails {
    fn name(&self) -> &'static str {
        "always-fails"
    }

    fn polarity_scores(&self, _text: &str) -> Result<PolarityScores, EngineError> {
        Err(EngineError::Failed("offline".into()))
    }
}

#[tokio::test]
async fn client_surfaces_error_status() {
    let app = api::router(AppState::new(Arc::new(AlwaysFails)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = SentimentClient::new(&format!("http://{addr}")).unwrap();

    // Empty batches short-circuit without a request.
    assert!(client.analyze(&[]).await.unwrap().is_empty());

    let err = client
        .analyze(&[item("t", "S", "x")])
        .await
        .expect_err("500 must be an error");
    let msg = format!("{err:#}");
    assert!(msg.contains("500"), "error: {msg}");
    assert!(msg.contains("scoring_error"), "error: {msg}");
}
