use axum::extract::State;
use classpulse_core::{ApiResponse, AppError, ErrorEnvelope};
use tracing::instrument;

use super::model::{LoginRequest, LoginResponse, VerifyResponse};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::JsonBody;

/// Log in as an admin
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Username or password missing", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 429, description = "Too many login attempts"),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, request, &state.jwt_config).await?;
    Ok(ApiResponse::success(response).with_message("Login successful"))
}

/// Log out
///
/// Tokens are not tracked server side; the client discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout acknowledged", body = ApiResponse<String>)
    ),
    tag = "Authentication"
)]
#[instrument]
pub async fn logout() -> ApiResponse<()> {
    ApiResponse::message("Logout successful")
}

/// Check the current admin token
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = ApiResponse<VerifyResponse>),
        (status = 401, description = "No token supplied", body = ErrorEnvelope),
        (status = 403, description = "Invalid or expired token", body = ErrorEnvelope),
        (status = 404, description = "Admin no longer exists", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user), fields(admin_id = %auth_user.admin_id()))]
pub async fn verify(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<VerifyResponse>, AppError> {
    let user = AuthService::profile(&state.db, auth_user.admin_id()).await?;
    Ok(ApiResponse::success(VerifyResponse { user }))
}
