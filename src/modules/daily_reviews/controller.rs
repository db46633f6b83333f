use axum::extract::{Path, State};
use axum::http::StatusCode;
use classpulse_core::{ApiResponse, AppError, ErrorEnvelope};
use tracing::instrument;

use super::model::{
    CreateDailyReviewDto, DailyReview, DailyReviewFilter, PaginatedDailyReviews,
    UpdateDailyReviewDto,
};
use super::service::DailyReviewService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{QueryParams, ValidatedJson, parse_id};

/// List daily reviews, newest date first
#[utoipa::path(
    get,
    path = "/api/admin/daily-reviews",
    params(DailyReviewFilter),
    responses(
        (status = 200, description = "One page of reviews", body = ApiResponse<PaginatedDailyReviews>),
        (status = 400, description = "Invalid query parameters", body = ErrorEnvelope),
        (status = 401, description = "No token supplied", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Daily Reviews"
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<DailyReviewFilter>,
) -> Result<ApiResponse<PaginatedDailyReviews>, AppError> {
    let page = DailyReviewService::list_reviews(&state.db, &filter).await?;
    Ok(ApiResponse::success(page))
}

#[utoipa::path(
    get,
    path = "/api/admin/daily-reviews/{id}",
    params(("id" = String, Path, description = "Review id (UUID)")),
    responses(
        (status = 200, description = "The review", body = ApiResponse<DailyReview>),
        (status = 404, description = "Review not found", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Daily Reviews"
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DailyReview>, AppError> {
    let id = parse_id(&id)?;
    let review = DailyReviewService::get_review(&state.db, id).await?;
    Ok(ApiResponse::success(review))
}

/// Create a review authored by the calling admin
#[utoipa::path(
    post,
    path = "/api/admin/daily-reviews",
    request_body = CreateDailyReviewDto,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<DailyReview>),
        (status = 400, description = "Validation error", body = ErrorEnvelope),
        (status = 409, description = "A review already exists for that date", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Daily Reviews"
)]
#[instrument(skip(state, auth_user, dto), fields(admin_id = %auth_user.admin_id()))]
pub async fn create_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateDailyReviewDto>,
) -> Result<(StatusCode, ApiResponse<DailyReview>), AppError> {
    let review = DailyReviewService::create_review(&state.db, auth_user.admin_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(review).with_message("Daily review created successfully"),
    ))
}

/// Update a review; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/admin/daily-reviews/{id}",
    params(("id" = String, Path, description = "Review id (UUID)")),
    request_body = UpdateDailyReviewDto,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<DailyReview>),
        (status = 400, description = "Validation error or malformed id", body = ErrorEnvelope),
        (status = 404, description = "Review not found", body = ErrorEnvelope),
        (status = 409, description = "A review already exists for that date", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Daily Reviews"
)]
#[instrument(skip(state, dto))]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateDailyReviewDto>,
) -> Result<ApiResponse<DailyReview>, AppError> {
    let id = parse_id(&id)?;
    let review = DailyReviewService::update_review(&state.db, id, dto).await?;
    Ok(ApiResponse::success(review).with_message("Daily review updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/admin/daily-reviews/{id}",
    params(("id" = String, Path, description = "Review id (UUID)")),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<String>),
        (status = 404, description = "Review not found", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Daily Reviews"
)]
#[instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let id = parse_id(&id)?;
    DailyReviewService::delete_review(&state.db, id).await?;
    Ok(ApiResponse::message("Daily review deleted successfully"))
}
