// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use news_sentiment_service::{build_app, ServiceConfig};

// Full in-process app with /metrics mounted.
fn metrics_app() -> Router {
    let cfg = ServiceConfig {
        metrics: true,
        ..ServiceConfig::default()
    };
    build_app(&cfg).expect("build_app with metrics")
}

fn payload() -> &'static str {
    r#"[{"timestamp":"t1","stock":"AAPL","newsData":"Great quarter, profits soar!"},
        {"timestamp":"t1","stock":"TSLA","newsData":"Recall widens, losses mount"}]"#
}

async fn scrape(app: Router) -> String {
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn metrics_endpoint_contains_expected_series() {
    let app = metrics_app();

    let ok = app
        .clone()
        .oneshot(
            Request::post("/analyze-sentiment")
                .header("content-type", "application/json")
                .body(Body::from(payload()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let bad = app
        .clone()
        .oneshot(
            Request::post("/analyze-sentiment")
                .header("content-type", "application/json")
                .body(Body::from(r#"[{"timestamp":"t1"}]"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let text = scrape(app).await;
    for needle in [
        "sentiment_requests_total",
        "sentiment_items_total",
        "sentiment_rejected_total",
        "sentiment_batch_duration_ms",
        "sentiment_body_limit_bytes",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
    assert!(text.contains(r#"label="positive""#), "no positive label series\n{text}");
}

#[tokio::test]
async fn metrics_route_absent_when_disabled() {
    let app = build_app(&ServiceConfig::default()).expect("build_app");
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_init_reuses_recorder() {
    // Both apps share the process-wide recorder; building twice must not fail.
    let _a = metrics_app();
    let b = metrics_app();
    let text = scrape(b).await;
    assert!(text.contains("sentiment_body_limit_bytes"));
}
