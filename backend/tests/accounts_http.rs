//! HTTP behaviour of registration, login and the caller's profile.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

use support::{authorised, init_app, register_and_login, send};

#[rstest]
#[actix_web::test]
async fn registration_returns_profile_without_password() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        TestRequest::post().uri("/api/users").set_json(json!({
            "username": "khannedy",
            "password": "rahasia",
            "name": "Eko Khannedy",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "khannedy", "name": "Eko Khannedy"}));
}

#[rstest]
#[actix_web::test]
async fn duplicate_username_conflicts() {
    let app = init_app().await;
    register_and_login(&app, "khannedy").await;

    let (status, body) = send(
        &app,
        TestRequest::post().uri("/api/users").set_json(json!({
            "username": "khannedy",
            "password": "other",
            "name": "Someone Else",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
}

#[rstest]
#[actix_web::test]
async fn invalid_registration_lists_every_violation() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"username": "", "password": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    let fields: Vec<&str> = body
        .pointer("/details/violations")
        .and_then(Value::as_array)
        .expect("violations listed")
        .iter()
        .filter_map(|v| v.get("field").and_then(Value::as_str))
        .collect();
    assert_eq!(fields, ["username", "password", "name"]);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri("/api/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorised() {
    let app = init_app().await;
    register_and_login(&app, "khannedy").await;

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "khannedy", "password": "salah"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("username or password wrong")
    );
}

#[rstest]
#[actix_web::test]
async fn current_user_requires_token() {
    let app = init_app().await;

    let (status, body) = send(&app, TestRequest::get().uri("/api/users/current")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("login required")
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_token_is_rejected() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        authorised(TestRequest::get().uri("/api/users/current"), "not-a-token"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("invalid token")
    );
}

#[rstest]
#[actix_web::test]
async fn anonymous_malformed_profile_update_is_unauthorised() {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        TestRequest::patch()
            .uri("/api/users/current")
            .set_json(json!({"name": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("login required")
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_profile_update_is_invalid_request_once_logged_in() {
    let app = init_app().await;
    let token = register_and_login(&app, "khannedy").await;

    let (status, body) = send(
        &app,
        authorised(TestRequest::patch().uri("/api/users/current"), &token)
            .set_json(json!({"name": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[rstest]
#[actix_web::test]
async fn profile_update_changes_name_and_password() {
    let app = init_app().await;
    let token = register_and_login(&app, "khannedy").await;

    let (status, body) = send(
        &app,
        authorised(TestRequest::patch().uri("/api/users/current"), &token)
            .set_json(json!({"name": "Eko Kurniawan", "password": "baru"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"username": "khannedy", "name": "Eko Kurniawan"}));

    let (status, _) = send(
        &app,
        TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "khannedy", "password": "baru"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn logout_revokes_token() {
    let app = init_app().await;
    let token = register_and_login(&app, "khannedy").await;

    let (status, body) = send(
        &app,
        authorised(TestRequest::delete().uri("/api/users/logout"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK"}));

    let (status, _) = send(
        &app,
        authorised(TestRequest::get().uri("/api/users/current"), &token),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn new_login_replaces_previous_token() {
    let app = init_app().await;
    let first = register_and_login(&app, "khannedy").await;

    let (_, body) = send(
        &app,
        TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "khannedy", "password": "rahasia"})),
    )
    .await;
    let second = body
        .get("token")
        .and_then(Value::as_str)
        .expect("token issued")
        .to_owned();

    let (status, _) = send(
        &app,
        authorised(TestRequest::get().uri("/api/users/current"), &first),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        authorised(TestRequest::get().uri("/api/users/current"), &second),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
