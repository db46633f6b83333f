use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::{TypedHeader, headers::UserAgent};
use classpulse_core::{ApiResponse, AppError, ErrorEnvelope};
use serde_json::Value;
use tracing::{instrument, warn};

use super::device::classify_device;
use super::model::{CreateFeedbackDto, FeedbackCreated, PublicFeedbackStats};
use super::service::FeedbackService;
use super::validation::{normalize_whole_numbers, validate_feedback};
use crate::metrics::{track_feedback_rejected, track_feedback_submitted};
use crate::state::AppState;
use crate::validator::JsonBody;

/// Submit student feedback
///
/// Every field problem is reported at once in `error.details`. The device
/// type is derived from the `User-Agent` header.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback stored", body = ApiResponse<FeedbackCreated>),
        (status = 400, description = "Validation failed or malformed body", body = ErrorEnvelope),
        (status = 429, description = "Too many submissions from this address"),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tag = "Feedback"
)]
#[instrument(skip(state, user_agent, body))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    JsonBody(mut body): JsonBody<Value>,
) -> Result<(StatusCode, ApiResponse<FeedbackCreated>), AppError> {
    let validation = validate_feedback(&body);
    if !validation.is_valid() {
        track_feedback_rejected();
        warn!(errors = ?validation.errors, "Feedback rejected");
        return Err(AppError::validation(validation.errors));
    }
    normalize_whole_numbers(&mut body);

    let dto: CreateFeedbackDto = serde_json::from_value(body).map_err(|err| {
        track_feedback_rejected();
        warn!(error = %err, "Feedback did not match the submission shape");
        AppError::validation(vec!["Invalid field type in request".to_string()])
    })?;

    let user_agent = user_agent
        .as_ref()
        .map(|TypedHeader(agent)| agent.as_str())
        .unwrap_or_default();
    let device_type = classify_device(user_agent);

    let created =
        FeedbackService::create_feedback(&state.db, dto, device_type, user_agent).await?;
    track_feedback_submitted(device_type.as_str());

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(created).with_message("Feedback submitted successfully"),
    ))
}

/// Public feedback statistics
#[utoipa::path(
    get,
    path = "/api/feedback",
    responses(
        (status = 200, description = "Aggregated statistics", body = ApiResponse<PublicFeedbackStats>),
        (status = 503, description = "Database unavailable", body = ErrorEnvelope)
    ),
    tag = "Feedback"
)]
#[instrument(skip(state))]
pub async fn get_feedback_stats(
    State(state): State<AppState>,
) -> Result<ApiResponse<PublicFeedbackStats>, AppError> {
    let stats = FeedbackService::public_stats(&state.db).await?;
    Ok(ApiResponse::success(stats))
}
