#![allow(dead_code)]

use std::sync::Arc;

use api::AppState;
use api::config::Config;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use food_store::store::memory::{MemoryListingStore, MemoryRequestStore};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config(environment: &str) -> Config {
    Config::from_lookup(|key| match key {
        "ACCESS_TOKEN_SECRET" => Some(TEST_SECRET.to_owned()),
        "STORE_BACKEND" => Some("memory".to_owned()),
        "APP_ENV" => Some(environment.to_owned()),
        _ => None,
    })
    .unwrap()
}

pub fn build_app() -> Router {
    build_app_in("development")
}

pub fn build_app_in(environment: &str) -> Router {
    let config = test_config(environment);
    let state = AppState::new(
        &config,
        Arc::new(MemoryListingStore::new()),
        Arc::new(MemoryRequestStore::new()),
    );

    api::app(&config, state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Posts a listing and returns its generated id.
pub async fn create_food(app: &Router, food: Value) -> String {
    let response = send(app, "POST", "/foods", Some(food)).await;
    assert_eq!(response.status, StatusCode::OK);

    response.body["insertedId"]
        .as_str()
        .expect("insert acknowledgement carries the id")
        .to_owned()
}
