use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use classpulse_core::{ApiResponse, AppError, ErrorEnvelope, PageParams};
use tracing::{info, instrument};

use super::export::{export_filename, feedback_to_csv};
use super::model::{AdminFeedbackList, DashboardData, ExportFormat, ExportQuery, FeedbackExport};
use super::service::AdminService;
use crate::metrics::{track_export, track_feedback_deleted};
use crate::middleware::auth::AuthUser;
use crate::modules::feedback::service::FeedbackService;
use crate::state::AppState;
use crate::validator::{QueryParams, parse_id};

/// List feedback, newest first
#[utoipa::path(
    get,
    path = "/api/admin/feedback",
    params(PageParams),
    responses(
        (status = 200, description = "One page of feedback with summary statistics", body = ApiResponse<AdminFeedbackList>),
        (status = 400, description = "Invalid query parameters", body = ErrorEnvelope),
        (status = 401, description = "No token supplied", body = ErrorEnvelope),
        (status = 403, description = "Invalid or expired token", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PageParams>,
) -> Result<ApiResponse<AdminFeedbackList>, AppError> {
    let list = AdminService::list_feedback(&state.db, &params).await?;
    Ok(ApiResponse::success(list))
}

/// Delete one feedback record
#[utoipa::path(
    delete,
    path = "/api/admin/feedback/{id}",
    params(("id" = String, Path, description = "Feedback id (UUID)")),
    responses(
        (status = 200, description = "Feedback deleted", body = ApiResponse<String>),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "No feedback with that id", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user), fields(admin_id = %auth_user.admin_id()))]
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let id = parse_id(&id)?;
    AdminService::delete_feedback(&state.db, id).await?;
    track_feedback_deleted();
    Ok(ApiResponse::message("Feedback deleted successfully"))
}

/// Dashboard overview, breakdowns and 30-day trends
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = ApiResponse<DashboardData>),
        (status = 401, description = "No token supplied", body = ErrorEnvelope),
        (status = 403, description = "Invalid or expired token", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<ApiResponse<DashboardData>, AppError> {
    let data = AdminService::dashboard(&state.db).await?;
    Ok(ApiResponse::success(data))
}

/// Download every feedback record as a JSON or CSV attachment
#[utoipa::path(
    get,
    path = "/api/admin/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "JSON export", body = ApiResponse<FeedbackExport>, content_type = "application/json"),
        (status = 200, description = "CSV export", body = String, content_type = "text/csv"),
        (status = 400, description = "Unknown format", body = ErrorEnvelope)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, auth_user), fields(admin_id = %auth_user.admin_id()))]
pub async fn export_feedback(
    State(state): State<AppState>,
    auth_user: AuthUser,
    QueryParams(query): QueryParams<ExportQuery>,
) -> Result<Response, AppError> {
    let format = query.format.unwrap_or_default();
    let feedback = FeedbackService::list_all(&state.db).await?;
    let now = Utc::now();
    let records = feedback.len();

    let response = match format {
        ExportFormat::Csv => {
            let disposition = format!("attachment; filename=\"{}\"", export_filename(now, "csv"));
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                feedback_to_csv(&feedback),
            )
                .into_response()
        }
        ExportFormat::Json => {
            let disposition =
                format!("attachment; filename=\"{}\"", export_filename(now, "json"));
            let body = ApiResponse::success(FeedbackExport {
                export_date: now,
                total_records: records,
                feedback,
            });
            ([(header::CONTENT_DISPOSITION, disposition)], body).into_response()
        }
    };

    let format_name = match format {
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };
    track_export(format_name, records);
    info!(format = format_name, records, "Feedback exported");

    Ok(response)
}
