//! Requests that are answered before any query runs.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    empty_request, json_request, offline_app, send, token_for, token_issued_at, valid_feedback,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_feedback_validation_reports_only_the_bad_rating() {
    let app = offline_app();
    let body = json!({
        "name": "Jo",
        "phoneNumber": "123",
        "teachingSkills": 11,
        "realWorldExplanation": 5,
        "overallSatisfaction": 5,
        "realWorldTopics": false,
        "futureTopics": [],
        "teachingPace": "TOO_SLOW"
    });

    let (status, body) = send(&app, json_request("POST", "/api/feedback", &body, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!(["Teaching skills rating must be between 1 and 10"])
    );
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_feedback_validation_collects_every_error() {
    let app = offline_app();
    let mut body = valid_feedback();
    body["name"] = json!("R2-D2");
    body["overallSatisfaction"] = json!(7.5);
    body["teachingPace"] = json!("FAST");

    let (status, body) = send(&app, json_request("POST", "/api/feedback", &body, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["details"],
        json!([
            "Name can only contain letters and spaces",
            "Overall satisfaction rating must be between 1 and 10",
            "Teaching pace must be TOO_FAST, PERFECT, or TOO_SLOW"
        ])
    );
}

#[tokio::test]
async fn test_malformed_json_is_invalid_request_body() {
    let app = offline_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/feedback")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn test_missing_content_type_is_invalid_request_body() {
    let app = offline_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/feedback")
        .body(axum::body::Body::from(valid_feedback().to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn test_admin_routes_require_a_token() {
    let app = offline_app();
    for uri in [
        "/api/admin/feedback",
        "/api/admin/dashboard",
        "/api/admin/export",
        "/api/admin/questions",
        "/api/admin/daily-reviews",
        "/api/auth/verify",
    ] {
        let (status, body) = send(&app, empty_request("GET", uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"]["code"], "NO_TOKEN", "{uri}");
    }
}

#[tokio::test]
async fn test_forged_token_is_invalid() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        empty_request("GET", "/api/admin/feedback", Some("not.a.token")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_is_distinct_from_invalid() {
    let app = offline_app();
    let token = token_issued_at(Uuid::new_v4(), "admin", Utc::now() - Duration::hours(25));

    let (status, body) = send(
        &app,
        empty_request("GET", "/api/admin/dashboard", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_malformed_feedback_id_is_invalid_id() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), "admin");

    let (status, body) = send(
        &app,
        empty_request("DELETE", "/api/admin/feedback/not-a-uuid", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ID");
}

#[tokio::test]
async fn test_unknown_export_format_is_rejected() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), "admin");

    let (status, body) = send(
        &app,
        empty_request("GET", "/api/admin/export?format=xml", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_question_dto_is_validated() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), "admin");

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/questions",
            &json!({ "title": "", "type": "TEXT" }),
            Some(&token),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!(["Title must be between 1 and 255 characters"])
    );
}

#[tokio::test]
async fn test_login_without_credentials() {
    let app = offline_app();
    for payload in [
        json!({}),
        json!({ "username": "admin" }),
        json!({ "username": "  ", "password": "secret" }),
    ] {
        let (status, body) = send(
            &app,
            json_request("POST", "/api/auth/login", &payload, None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIALS");
    }
}

#[tokio::test]
async fn test_logout_acknowledges() {
    let app = offline_app();
    let (status, body) = send(&app, empty_request("POST", "/api/auth/logout", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logout successful");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = offline_app();
    let (status, body) = send(&app, empty_request("GET", "/api/does-not-exist", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Endpoint not found");
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let app = offline_app();
    let (status, body) = send(&app, empty_request("PATCH", "/api/feedback", None)).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = offline_app();
    let (status, body) = send(&app, empty_request("GET", "/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "ClassPulse API");
    assert!(body["paths"]["/api/feedback"]["post"].is_object());
}
