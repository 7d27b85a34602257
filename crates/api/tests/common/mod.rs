#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hostel_api::auth::jwt::JwtConfig;
use hostel_api::config::{ServerConfig, StorageBackend};
use hostel_api::router::build_app_router;
use hostel_api::state::AppState;
use hostel_db::Stores;

/// Build a test `ServerConfig` running on the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        min_password_length: 8,
        allow_warden_signup: true,
        overdue_sweep_interval_secs: 0,
        static_dir: None,
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Stores::in_memory())
}

/// Same as [`build_test_app`] but over caller-provided stores, so a test
/// can seed or inspect state directly.
pub fn build_test_app_with(stores: Stores) -> Router {
    let config = test_config();
    let state = AppState {
        stores,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, builder("GET", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("GET", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, "POST", uri, None, body).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    json_request(app, "POST", uri, Some(token), body).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("POST", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    json_request(app, "PUT", uri, Some(token), body).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("DELETE", uri, Some(token)).body(Body::empty()).unwrap()).await
}

async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status code and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {json}");
    json
}

/// Register a warden account and return its access token.
pub async fn register_warden(app: &Router, username: &str) -> String {
    let body = json!({
        "username": username,
        "email": format!("{username}@hostel.test"),
        "password": "warden-pass-123",
        "role": "warden",
        "full_name": "Head Warden",
    });
    let json = expect_status(post_json(app, "/api/auth/register", body).await, StatusCode::CREATED).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Register a student account linked to `student_code` and return its token.
pub async fn register_student(app: &Router, username: &str, student_code: &str) -> String {
    let body = json!({
        "username": username,
        "email": format!("{username}@hostel.test"),
        "password": "student-pass-123",
        "role": "student",
        "full_name": "Resident Student",
        "student_id": student_code,
    });
    let json = expect_status(post_json(app, "/api/auth/register", body).await, StatusCode::CREATED).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create a Student record through the API and return its `id`.
pub async fn create_student(app: &Router, token: &str, code: &str, name: &str) -> String {
    let body = json!({
        "name": name,
        "email": format!("{}@students.test", code.to_lowercase()),
        "phone": "+15550100",
        "student_id": code,
    });
    let json = expect_status(post_json_auth(app, "/api/students", token, body).await, StatusCode::CREATED).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

/// Create a room through the API and return its `id`.
pub async fn create_room(app: &Router, token: &str, number: &str, capacity: i32) -> String {
    let body = json!({ "room_number": number, "floor": 1, "capacity": capacity });
    let json = expect_status(post_json_auth(app, "/api/rooms", token, body).await, StatusCode::CREATED).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
