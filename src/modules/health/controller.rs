use anyhow::anyhow;
use axum::extract::State;
use axum::http::StatusCode;
use classpulse_core::{ApiResponse, AppError, ErrorEnvelope, codes};
use serde::Serialize;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "connected")]
    pub database: &'static str,
}

/// Liveness and database connectivity
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "API and database are up", body = ApiResponse<HealthStatus>),
        (status = 503, description = "Database unreachable", body = ErrorEnvelope)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<ApiResponse<HealthStatus>, AppError> {
    if !classpulse_db::ping(&state.db).await {
        warn!("Health check failed: database unavailable");
        return Err(AppError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DATABASE_CONNECTION_ERROR,
            anyhow!("Database unavailable"),
        ));
    }

    Ok(ApiResponse::success(HealthStatus {
        status: "ok",
        database: "connected",
    })
    .with_message("API is healthy"))
}
