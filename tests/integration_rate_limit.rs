mod common;

use axum::http::StatusCode;
use classpulse::classpulse_config::RateLimitConfig;
use classpulse::classpulse_config::rate_limit::Bucket;
use classpulse::router::init_router;
use common::{lazy_pool, state_with};
use serde_json::json;
use tower::ServiceExt;

fn strict_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        general: Bucket {
            replenish_secs: 60,
            burst: 50,
        },
        feedback: Bucket {
            replenish_secs: 3600,
            burst: 2,
        },
        auth: Bucket {
            replenish_secs: 3600,
            burst: 1,
        },
    }
}

fn request_from(ip: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .body(axum::body::Body::from(json!({}).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_feedback_submissions_are_limited_per_ip() {
    let app = init_router(state_with(lazy_pool(), strict_config()));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request_from("192.168.1.10", "/api/feedback"))
            .await
            .unwrap();
        // Invalid body, but the request was let through.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .clone()
        .oneshot(request_from("192.168.1.10", "/api/feedback"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .clone()
        .oneshot(request_from("192.168.1.11", "/api/feedback"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_is_limited_separately() {
    let app = init_router(state_with(lazy_pool(), strict_config()));

    let response = app
        .clone()
        .oneshot(request_from("10.0.0.5", "/api/auth/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request_from("10.0.0.5", "/api/auth/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // The feedback bucket for the same address is untouched.
    let response = app
        .clone()
        .oneshot(request_from("10.0.0.5", "/api/feedback"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disabled_rate_limit_never_rejects() {
    let app = init_router(state_with(lazy_pool(), RateLimitConfig::disabled()));

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(request_from("172.16.0.1", "/api/auth/login"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
