#![cfg(feature = "db-tests")]

mod common;

use axum::http::StatusCode;
use classpulse::modules::auth::service::AuthService;
use common::{app, create_admin, empty_request, json_request, send, token_for};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_login_then_verify(pool: PgPool) {
    let id = create_admin(&pool, "instructor", "s3cret-pass").await;
    let app = app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            &json!({ "username": "instructor", "password": "s3cret-pass" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["id"], id.to_string());
    assert_eq!(body["data"]["user"]["username"], "instructor");
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["user"]["lastLogin"].is_string());
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = send(&app, empty_request("GET", "/api/auth/verify", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "instructor");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_records_last_login(pool: PgPool) {
    create_admin(&pool, "instructor", "s3cret-pass").await;
    let app = app(pool.clone());

    send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            &json!({ "username": "instructor", "password": "s3cret-pass" }),
            None,
        ),
    )
    .await;

    let last_login = sqlx::query_scalar::<_, Option<chrono::DateTime<chrono::Utc>>>(
        "SELECT last_login FROM admin_users WHERE username = 'instructor'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(last_login.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrong_password_and_unknown_user_look_the_same(pool: PgPool) {
    create_admin(&pool, "instructor", "s3cret-pass").await;
    let app = app(pool);

    for payload in [
        json!({ "username": "instructor", "password": "wrong" }),
        json!({ "username": "nobody", "password": "s3cret-pass" }),
    ] {
        let (status, body) = send(&app, json_request("POST", "/api/auth/login", &payload, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["error"]["message"], "Invalid username or password");
        assert!(body.get("data").is_none());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_for_removed_admin(pool: PgPool) {
    let app = app(pool);
    let token = token_for(Uuid::new_v4(), "ghost");

    let (status, body) = send(&app, empty_request("GET", "/api/auth/verify", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_overlong_username_is_a_client_error(pool: PgPool) {
    let err = AuthService::create_admin(&pool, &"a".repeat(150), "s3cret-pass", 4)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.code, "DATABASE_ERROR");
}
