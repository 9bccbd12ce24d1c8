//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use watershed_content::ContentCatalog;
use watershed_content::application::ingest::load_builtin_catalog;
use watershed_core::clock::Clock;
use watershed_test_support::{FixedClock, fixture_catalog};

use watershed_api::build_router;
use watershed_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router over `catalog` with a fresh session installed.
pub fn build_test_app_with(catalog: ContentCatalog) -> Router {
    build_router(AppState::with_session(fixed_clock(), Arc::new(catalog)))
}

/// Build the full app router over the test fixture catalog.
pub fn build_test_app() -> Router {
    build_test_app_with(fixture_catalog())
}

/// Build the full app router over the built-in catalog.
pub fn build_builtin_app() -> Router {
    build_test_app_with(load_builtin_catalog().unwrap())
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &Router,
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

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Asserts a JSON number is within tolerance of `expected`.
pub fn assert_json_close(value: &serde_json::Value, expected: f64) {
    watershed_test_support::assert_close(value.as_f64().unwrap(), expected);
}
