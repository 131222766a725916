mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{send, test_app, EMAIL, PASSWORD};

#[tokio::test]
async fn protected_routes_require_a_session() {
    let app = test_app();

    let (status, body) = send(&app.router, Method::GET, "/api/v1/players", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, _) = send(
        &app.router,
        Method::GET,
        "/api/v1/players",
        Some("not-a-session"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/v1/players").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_issues_a_usable_session() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": EMAIL, "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, session) = send(
        &app.router,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": EMAIL, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["access_token"].as_str().unwrap().to_string();

    let (status, info) = send(
        &app.router,
        Method::GET,
        "/api/v1/auth/session",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["user"]["id"], app.user_id.as_str());
    assert_eq!(info["user"]["email"], EMAIL);
}

#[tokio::test]
async fn signup_validates_and_signs_in() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "email": "new@example.com",
            "password": "long-enough",
            "confirm_password": "different"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Passwords do not match");

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "email": EMAIL,
            "password": "long-enough",
            "confirm_password": "long-enough"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (status, outcome) = send(
        &app.router,
        Method::POST,
        "/api/v1/auth/signup",
        None,
        Some(json!({
            "email": "new@example.com",
            "password": "long-enough",
            "confirm_password": "long-enough"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["status"], "signed_in");
    assert!(outcome["session"]["access_token"].is_string());
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = test_app();

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/v1/auth/logout",
        Some(&app.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get("/api/v1/auth/session").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
