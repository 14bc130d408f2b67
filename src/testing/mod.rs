use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::database::{ClothingItem, NewClothing};
use crate::middleware::API_KEY_HEADER;
use crate::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

/// In-memory state holding four items: Red/M/10, Dark Red/L/3, Blue/S/0, Green/XL/-2
pub async fn seeded_state() -> (AppState, Vec<ClothingItem>) {
    let state = AppState::in_memory(AppConfig::for_memory(TEST_API_KEY));
    let mut items = Vec::new();
    for (color, size, stock) in [("Red", "M", 10), ("Dark Red", "L", 3), ("Blue", "S", 0), ("Green", "XL", -2)] {
        let data = NewClothing { color: color.into(), size: size.into(), price: 19.99, stock };
        items.push(state.clothing.add(data).await.expect("seed item"));
    }
    (state, items)
}

pub async fn request(app: Router, method: Method, uri: &str, api_key: Option<&str>, body: Option<Value>) -> TestResponse {
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    request_raw(app, method, uri, api_key, &body).await
}

pub async fn request_raw(app: Router, method: Method, uri: &str, api_key: Option<&str>, body: &str) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if !body.is_empty() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(key) = api_key {
        builder = builder.header(API_KEY_HEADER, key);
    }
    let request = builder.body(Body::from(body.to_string())).expect("request");

    let response = app.oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    TestResponse {
        status,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
