//! HTTP tests for the auth API, driving the router in-process.

use axum::{
    body::{Body, BodyDataStream},
    http::{Request, StatusCode},
};
use futures::StreamExt;
use serde_json::{json, Value};
use std::time::Duration;
use tower::util::ServiceExt;

mod common;
use common::*;

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = create_test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_then_me_then_logout() {
    let app = create_test_app().await;

    let (status, _) = send(&app, "GET", "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "user@gmail.com", "password": "user123", "remember": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "user@gmail.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = send(&app, "GET", "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "User");

    let (status, _) = send(&app, "POST", "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "admin@gmail.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_register_errors_map_to_status_codes() {
    let app = create_test_app().await;

    let cases = [
        (json!({"name": "Ana", "email": "user@gmail.com", "password": "pass123", "terms_accepted": true}),
         StatusCode::CONFLICT, "email_taken"),
        (json!({"name": "Ana", "email": "ana@x.com", "password": "pass123"}),
         StatusCode::UNPROCESSABLE_ENTITY, "terms_not_accepted"),
        (json!({"name": "An", "email": "ana@x.com", "password": "pass123", "terms_accepted": true}),
         StatusCode::UNPROCESSABLE_ENTITY, "name_too_short"),
        (json!({"name": "Ana", "email": "ana@x.com", "password": "pass1", "terms_accepted": true}),
         StatusCode::UNPROCESSABLE_ENTITY, "password_too_short"),
    ];

    for (payload, expected_status, expected_code) in cases {
        let (status, body) = send(&app, "POST", "/api/auth/register", Some(payload)).await;
        assert_eq!(status, expected_status);
        assert_eq!(body["error"], expected_code);
    }
}

#[tokio::test]
async fn test_register_does_not_log_in() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({"name": "Ana", "email": "ana@x.com", "password": "pass123", "terms_accepted": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["name"], "Ana");
    assert_eq!(body["user"]["role"], "user");

    let (status, _) = send(&app, "GET", "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_listing_requires_admin() {
    let app = create_test_app().await;

    let (status, _) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "user@gmail.com", "password": "user123"})),
    )
    .await;
    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "admin@gmail.com", "password": "admin123", "remember": true})),
    )
    .await;
    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "admin@gmail.com");
    assert_eq!(users[0]["role"], "admin");
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

/// Reads the SSE body until one whole event is buffered and returns its
/// `event` name and parsed `data` payload.
async fn next_event(events: &mut BodyDataStream, buffer: &mut String) -> (String, Value) {
    while !buffer.contains("\n\n") {
        let chunk = tokio::time::timeout(Duration::from_secs(5), events.next())
            .await
            .expect("timed out waiting for event")
            .expect("event stream ended")
            .unwrap();
        buffer.push_str(&String::from_utf8_lossy(&chunk));
    }
    let end = buffer.find("\n\n").unwrap();
    let raw: String = buffer.drain(..end + 2).collect();

    let mut name = String::new();
    let mut data = String::new();
    for line in raw.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            name = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("data:") {
            data.push_str(value.trim());
        }
    }
    (name, serde_json::from_str(&data).unwrap())
}

#[tokio::test]
async fn test_events_replay_current_state_then_follow_login() {
    let app = create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let mut events = response.into_body().into_data_stream();
    let mut buffer = String::new();

    let (name, state) = next_event(&mut events, &mut buffer).await;
    assert_eq!(name, "auth");
    assert_eq!(state, Value::Null);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "user@gmail.com", "password": "user123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (name, state) = next_event(&mut events, &mut buffer).await;
    assert_eq!(name, "auth");
    assert_eq!(state["email"], "user@gmail.com");
    assert_eq!(state["role"], "user");
    assert!(state.get("password").is_none());

    send(&app, "POST", "/api/auth/logout", None).await;
    let (_, state) = next_event(&mut events, &mut buffer).await;
    assert_eq!(state, Value::Null);
}
