// tests/metrics_endpoint.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use voice_tracer::{app_with, Analyzer, AnalyzerConfig};

const TWO_SENTENCES: &str = "The kettle clicked off. Nobody moved to pour it.";

// Full in-process app, including `/metrics`.
fn build_app() -> Router {
    let analyzer = Analyzer::new(AnalyzerConfig::default()).expect("analyzer");
    app_with(Arc::new(analyzer)).expect("app_with() should build Router in tests")
}

async fn post_analyze(app: &Router, text: &str) -> StatusCode {
    let req = Request::post("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "text": text }).to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap().status()
}

async fn scrape(app: &Router) -> String {
    let resp = app
        .clone()
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
    let app = build_app();

    assert_eq!(post_analyze(&app, TWO_SENTENCES).await, StatusCode::OK);
    assert_eq!(
        post_analyze(&app, "Only one.").await,
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let text = scrape(&app).await;
    assert!(text.contains("voice_tracer_analyses_total"), "{text}");
    assert!(text.contains("voice_tracer_analysis_duration_ms"), "{text}");
    assert!(text.contains("voice_tracer_analysis_errors_total"), "{text}");
    assert!(text.contains("insufficient_data"), "{text}");
}

#[tokio::test]
async fn building_the_app_twice_reuses_the_recorder() {
    let a = build_app();
    let b = build_app();
    assert_eq!(post_analyze(&a, TWO_SENTENCES).await, StatusCode::OK);
    assert!(scrape(&b).await.contains("voice_tracer_analyses_total"));
}
