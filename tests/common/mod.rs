use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use booking_auth::{
    app::{self, AppState},
    config::Config,
    services::MemoryStore,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub async fn create_test_app() -> Router {
    let mut config = Config::default();
    config.auth.latency_ms = 0;
    let auth = app::build_service(Arc::new(MemoryStore::new()), &config)
        .await
        .unwrap();
    app::router(AppState::new(auth), &config.server)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
