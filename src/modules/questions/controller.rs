use axum::extract::{Path, State};
use axum::http::StatusCode;
use classpulse_core::{ApiResponse, AppError, ErrorEnvelope};
use tracing::instrument;

use super::model::{CreateQuestionDto, Question, UpdateQuestionDto};
use super::service::QuestionService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_id};

/// Active questions, in display order
#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "Active questions", body = ApiResponse<Vec<Question>>)
    ),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn list_active_questions(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Question>>, AppError> {
    let questions = QuestionService::list_questions(&state.db, true).await?;
    Ok(ApiResponse::success(questions))
}

/// Every question, including inactive ones
#[utoipa::path(
    get,
    path = "/api/admin/questions",
    responses(
        (status = 200, description = "All questions", body = ApiResponse<Vec<Question>>),
        (status = 401, description = "No token supplied", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn list_questions(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Question>>, AppError> {
    let questions = QuestionService::list_questions(&state.db, false).await?;
    Ok(ApiResponse::success(questions))
}

/// Create a question
#[utoipa::path(
    post,
    path = "/api/admin/questions",
    request_body = CreateQuestionDto,
    responses(
        (status = 201, description = "Question created", body = ApiResponse<Question>),
        (status = 400, description = "Validation error", body = ErrorEnvelope),
        (status = 409, description = "A question with this title exists", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, dto))]
pub async fn create_question(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateQuestionDto>,
) -> Result<(StatusCode, ApiResponse<Question>), AppError> {
    let question = QuestionService::create_question(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(question).with_message("Question created successfully"),
    ))
}

/// Update a question; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/admin/questions/{id}",
    params(("id" = String, Path, description = "Question id (UUID)")),
    request_body = UpdateQuestionDto,
    responses(
        (status = 200, description = "Question updated", body = ApiResponse<Question>),
        (status = 400, description = "Validation error or malformed id", body = ErrorEnvelope),
        (status = 404, description = "Question not found", body = ErrorEnvelope),
        (status = 409, description = "A question with this title exists", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state, dto))]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateQuestionDto>,
) -> Result<ApiResponse<Question>, AppError> {
    let id = parse_id(&id)?;
    let question = QuestionService::update_question(&state.db, id, dto).await?;
    Ok(ApiResponse::success(question).with_message("Question updated successfully"))
}

/// Delete a question
#[utoipa::path(
    delete,
    path = "/api/admin/questions/{id}",
    params(("id" = String, Path, description = "Question id (UUID)")),
    responses(
        (status = 200, description = "Question deleted", body = ApiResponse<String>),
        (status = 404, description = "Question not found", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Questions"
)]
#[instrument(skip(state))]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let id = parse_id(&id)?;
    QuestionService::delete_question(&state.db, id).await?;
    Ok(ApiResponse::message("Question deleted successfully"))
}
