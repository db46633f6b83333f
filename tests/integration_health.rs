#![cfg(feature = "db-tests")]

mod common;

use axum::http::StatusCode;
use common::{app, empty_request, send};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_health_reports_connected_store(pool: PgPool) {
    let app = app(pool);

    let (status, body) = send(&app, empty_request("GET", "/api/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "connected");
    assert_eq!(body["message"], "API is healthy");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_after_pool_is_closed(pool: PgPool) {
    let app = app(pool.clone());
    pool.close().await;

    let (status, body) = send(&app, empty_request("GET", "/api/health", None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "DATABASE_CONNECTION_ERROR");
}
