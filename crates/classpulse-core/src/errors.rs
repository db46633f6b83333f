//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. An [`AppError`] carries the
//! HTTP status, a stable machine-readable code (see [`codes`]), the
//! underlying [`anyhow::Error`] and, for validation failures, the itemised
//! list of problems.
//!
//! Store errors are classified centrally: any `sqlx::Error` converted with
//! `?` is mapped to a status and code (duplicate key, missing row,
//! connection failure) so individual services do not repeat the mapping.
//!
//! Outside production, server errors also expose the full error chain in
//! the `stack` field of the response body.

use std::sync::OnceLock;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::response::{ErrorBody, ErrorEnvelope};

/// Stable error codes returned in `error.code`.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_REQUEST_BODY: &str = "INVALID_REQUEST_BODY";
    pub const INVALID_ID: &str = "INVALID_ID";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const MISSING_CREDENTIALS: &str = "MISSING_CREDENTIALS";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const NO_TOKEN: &str = "NO_TOKEN";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const FEEDBACK_NOT_FOUND: &str = "FEEDBACK_NOT_FOUND";
    pub const QUESTION_NOT_FOUND: &str = "QUESTION_NOT_FOUND";
    pub const DAILY_REVIEW_NOT_FOUND: &str = "DAILY_REVIEW_NOT_FOUND";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
    pub const DUPLICATE_ENTRY: &str = "DUPLICATE_ENTRY";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const DATABASE_CONNECTION_ERROR: &str = "DATABASE_CONNECTION_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

static EXPOSE_INTERNAL_ERRORS: OnceLock<bool> = OnceLock::new();

/// Fixes whether server error details are exposed in responses.
///
/// Call once at startup. When never called, the `ENVIRONMENT` variable
/// decides: anything other than `production` exposes details.
pub fn init_error_exposure(expose: bool) {
    let _ = EXPOSE_INTERNAL_ERRORS.set(expose);
}

fn expose_internal_errors() -> bool {
    *EXPOSE_INTERNAL_ERRORS.get_or_init(|| {
        std::env::var("ENVIRONMENT")
            .map(|v| !v.eq_ignore_ascii_case("production"))
            .unwrap_or(true)
    })
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: Error,
    pub details: Option<Vec<String>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, code: &'static str, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code,
            error: err.into(),
            details: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL_SERVER_ERROR,
            err,
        )
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, codes::INVALID_REQUEST_BODY, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, codes::INVALID_CREDENTIALS, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, codes::INVALID_TOKEN, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, codes::DUPLICATE_ENTRY, err)
    }

    /// A 400 carrying every validation problem found in the request.
    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: codes::VALIDATION_ERROR,
            error: anyhow::anyhow!("Invalid data provided"),
            details: Some(errors),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    fn public_message(&self) -> String {
        if self.status == StatusCode::INTERNAL_SERVER_ERROR && !expose_internal_errors() {
            return "Internal server error".to_string();
        }
        self.error.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                code = self.code,
                error = ?self.error,
                "Request failed"
            );
        }

        let stack = (self.status.is_server_error() && expose_internal_errors())
            .then(|| format!("{:?}", self.error));

        let body = ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.public_message(),
                details: self.details,
                stack,
            },
            timestamp: Utc::now(),
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let err: Error = err.into();

        let Some(db_err) = err.downcast_ref::<sqlx::Error>() else {
            return AppError::internal(err);
        };

        let (status, code, message) = classify_sqlx_error(db_err);
        match message {
            Some(message) => AppError::new(status, code, err.context(message)),
            None => AppError::new(status, code, err),
        }
    }
}

fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, Option<&'static str>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            Some("Record not found"),
        ),
        sqlx::Error::Database(db) if db.is_unique_violation() => (
            StatusCode::CONFLICT,
            codes::DUPLICATE_ENTRY,
            Some("A record with this information already exists"),
        ),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_check_violation() => (
            StatusCode::BAD_REQUEST,
            codes::DATABASE_ERROR,
            Some("Database operation failed"),
        ),
        // string_data_right_truncation
        sqlx::Error::Database(db) if db.code().as_deref() == Some("22001") => (
            StatusCode::BAD_REQUEST,
            codes::DATABASE_ERROR,
            Some("A value is too long"),
        ),
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DATABASE_CONNECTION_ERROR,
            Some("Database connection failed"),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL_SERVER_ERROR,
            None,
        ),
    }
}
