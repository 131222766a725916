#![allow(dead_code)]

use std::sync::Arc;

use agentplay_core::{memory::MemoryBackend, utils::Clock};
use agentplay_server::{api::app_router, config::Config, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

pub const EMAIL: &str = "agent@example.com";
pub const PASSWORD: &str = "secret-password";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub backend: MemoryBackend,
    pub user_id: String,
    pub token: String,
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "AGENTPLAY_PUBLIC_URL" => Some("https://agentplay.example.com".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Router over an in-memory backend with one confirmed, signed-in user.
pub fn test_app() -> TestApp {
    let clock = Clock::fixed_date(today());
    let backend = MemoryBackend::new().with_clock(clock).with_auto_confirm();
    let user_id = backend.register_user(EMAIL, PASSWORD);
    let token = backend.open_session(&user_id).unwrap().access_token;

    let config = test_config();
    let state = AppState::new(Arc::new(backend.clone()), clock, &config.public_url);
    TestApp {
        router: app_router(state, &config),
        backend,
        user_id,
        token,
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, method, uri, token, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, Some(&self.token), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::POST, uri, Some(&self.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(&self.router, Method::PUT, uri, Some(&self.token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::DELETE, uri, Some(&self.token), None).await
    }
}
