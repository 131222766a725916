mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use serde_json::json;
use tower::ServiceExt;

use common::{test_app, TestApp};

async fn get_with_bearer(app: &TestApp, uri: &str) -> Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_public(app: &TestApp, uri: &str) -> Response {
    app.router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn feed_serves_open_reminders_for_the_token_owner() {
    let app = test_app();
    app.post(
        "/api/v1/reminders",
        json!({ "title": "Call club, then agent", "due_date": "2024-06-10" }),
    )
    .await;
    app.post(
        "/api/v1/reminders",
        json!({ "title": "Someday", "description": "No date yet" }),
    )
    .await;

    let response = get_public(&app, &format!("/api/v1/calendar/feed?token={}", app.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/calendar; charset=utf-8"
    );
    let body = body_text(response).await;
    assert!(body.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(body.contains("SUMMARY:Call club\\, then agent\r\n"));
    assert!(body.contains("DTSTART;VALUE=DATE:20240610\r\n"));
    assert!(!body.contains("Someday"));
    assert!(body.ends_with("END:VCALENDAR\r\n"));
}

#[tokio::test]
async fn feed_rejects_missing_or_unknown_tokens() {
    let app = test_app();

    let response = get_public(&app, "/api/v1/calendar/feed").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_public(&app, "/api/v1/calendar/feed?token=unknown").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn export_is_a_dated_download() {
    let app = test_app();
    app.post(
        "/api/v1/reminders",
        json!({ "title": "Medical", "due_date": "2024-06-03" }),
    )
    .await;

    let response = get_with_bearer(&app, "/api/v1/calendar/export").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"agentplay-reminders-2024-06-01.ics\""
    );
    let body = body_text(response).await;
    assert!(body.contains("SUMMARY:Medical\r\n"));
}

#[tokio::test]
async fn subscription_links_point_at_the_public_feed() {
    let app = test_app();
    let (status, subscription) = app.get("/api/v1/calendar/subscription").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        subscription["feed_url"],
        format!(
            "https://agentplay.example.com/api/v1/calendar/feed?token={}",
            app.token
        )
    );
    assert_eq!(
        subscription["webcal_url"],
        format!(
            "webcal://agentplay.example.com/api/v1/calendar/feed?token={}",
            app.token
        )
    );
}
