//! Movement ledger over HTTP: presence follows the last appended action.

mod common;

use axum::http::StatusCode;
use common::{create_student, expect_status, get_auth, post_json_auth, register_warden};
use serde_json::json;

async fn record(app: &axum::Router, token: &str, student: &str, action: &str) -> serde_json::Value {
    expect_status(
        post_json_auth(app, "/api/movements", token, json!({ "student_id": student, "action": action })).await,
        StatusCode::CREATED,
    )
    .await
}

async fn status_of(app: &axum::Router, token: &str, student: &str) -> String {
    let json = expect_status(get_auth(app, &format!("/api/students/{student}"), token).await, StatusCode::OK).await;
    json["data"]["status"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn check_in_then_out_scenario() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;
    let s1 = create_student(&app, &token, "S1", "Asha").await;

    assert_eq!(status_of(&app, &token, &s1).await, "out");

    let entry = record(&app, &token, &s1, "check_in").await;
    assert_eq!(entry["data"]["student_name"], "Asha");
    assert_eq!(status_of(&app, &token, &s1).await, "in");

    record(&app, &token, &s1, "check_out").await;
    assert_eq!(status_of(&app, &token, &s1).await, "out");
}

#[tokio::test]
async fn status_equals_last_action_for_any_sequence() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;

    let sequences: [&[&str]; 4] = [
        &["check_in", "check_in"],
        &["check_out", "check_in", "check_in", "check_out"],
        &["check_out"],
        &["check_in", "check_out", "check_out", "check_in"],
    ];
    for (i, actions) in sequences.iter().enumerate() {
        let student = create_student(&app, &token, &format!("SEQ{i}"), "Seq").await;
        for action in actions.iter() {
            record(&app, &token, &student, action).await;
        }
        let expected = if *actions.last().unwrap() == "check_in" { "in" } else { "out" };
        assert_eq!(status_of(&app, &token, &student).await, expected, "sequence {actions:?}");
    }
}

#[tokio::test]
async fn supplied_name_is_kept_and_unknown_action_is_rejected() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;
    let student = create_student(&app, &token, "S1", "Asha").await;

    let json = expect_status(
        post_json_auth(
            &app,
            "/api/movements",
            &token,
            json!({ "student_id": student, "action": "check_in", "student_name": "A. K." }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(json["data"]["student_name"], "A. K.");

    let json = expect_status(
        post_json_auth(&app, "/api/movements", &token, json!({ "student_id": student, "action": "teleport" })).await,
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(status_of(&app, &token, &student).await, "in");
}

#[tokio::test]
async fn unknown_student_is_not_found_and_leaves_ledger_empty() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;

    let json = expect_status(
        post_json_auth(
            &app,
            "/api/movements",
            &token,
            json!({ "student_id": uuid::Uuid::new_v4(), "action": "check_in" }),
        )
        .await,
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(json["code"], "NOT_FOUND");

    let json = expect_status(get_auth(&app, "/api/movements", &token).await, StatusCode::OK).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn recent_is_newest_first_and_limited() {
    let app = common::build_test_app();
    let token = register_warden(&app, "warden").await;
    let student = create_student(&app, &token, "S1", "Asha").await;
    for action in ["check_in", "check_out", "check_in"] {
        record(&app, &token, &student, action).await;
    }

    let json = expect_status(get_auth(&app, "/api/movements/recent?limit=2", &token).await, StatusCode::OK).await;
    let actions: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(actions, vec!["check_in".to_string(), "check_out".to_string()]);

    expect_status(get_auth(&app, "/api/movements/recent?limit=abc", &token).await, StatusCode::BAD_REQUEST).await;
}
