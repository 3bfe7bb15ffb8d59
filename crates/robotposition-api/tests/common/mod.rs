//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use robotposition_core::clock::Clock;
use robotposition_event_store::pg_event_repository::PgEventRepository;
use robotposition_test_support::FixedClock;
use sqlx::PgPool;
use tower::ServiceExt;

use robotposition_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with a real `PgEventRepository` and a fixed
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let event_repository = Arc::new(PgEventRepository::new(pool));
    robotposition_api::app(AppState::new(fixed_clock(), event_repository))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Place a robot and return its ID.
pub async fn place_robot(app: Router, x: i32, y: i32, facing: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/v1/robots/place",
        &serde_json::json!({ "x": x, "y": y, "facing": facing }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "place failed: {json}");
    json["robot_id"].as_str().unwrap().to_owned()
}
