//! Health endpoint and cross-cutting HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post_json, register_warden};
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_memory_store() {
    let app = common::build_test_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["storage"], "memory");
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/api/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_a_uuid_request_id() {
    let app = common::build_test_app();
    let response = get(&app, "/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok(), "x-request-id should be a UUID, got {id}");
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/rooms")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = post_json(&app, "/api/auth/login", serde_json::json!({ "username": "x" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_path_id_is_a_validation_error() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;
    let response = common::get_auth(&app, "/api/rooms/not-a-uuid", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/rooms")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}
