//! Request body and path extractors that fail with the shared error envelope.
//!
//! - [`JsonBody`]: any deserializable body; syntax errors and a missing
//!   `Content-Type: application/json` header give `400 INVALID_REQUEST_BODY`.
//! - [`ValidatedJson`]: a typed DTO checked with `validator`; shape and rule
//!   failures give `400 VALIDATION_ERROR` with one message per problem.
//! - [`QueryParams`]: query strings, `400 INVALID_FORMAT` when they do not parse.
//! - [`parse_id`]: path ids, `400 INVALID_ID` when not a UUID.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use classpulse_core::{AppError, codes};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

/// Turns serde's "missing field `x`" into "x is required".
fn describe_data_error(body_text: &str) -> String {
    if let Some(field) = body_text
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{} is required", field);
    }

    if body_text.contains("invalid type") || body_text.contains("unknown variant") {
        return "Invalid field type in request".to_string();
    }

    "Invalid field value in request".to_string()
}

fn body_rejection(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        )),
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request(anyhow!("Malformed JSON body")),
        _ => AppError::bad_request(anyhow!("Invalid request body")),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(body_rejection(&rejection)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(ref err) => {
                    AppError::validation(vec![describe_data_error(&err.body_text())])
                }
                other => body_rejection(&other),
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected query string");
                AppError::bad_request(anyhow!("Invalid query parameters"))
                    .with_code(codes::INVALID_FORMAT)
            })?;
        Ok(QueryParams(value))
    }
}

pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        AppError::bad_request(anyhow!("Invalid ID format: {}", raw)).with_code(codes::INVALID_ID)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);

        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, codes::INVALID_ID);
    }

    #[test]
    fn test_describe_missing_field() {
        let msg = describe_data_error(
            "Failed to deserialize the JSON body into the target type: missing field `title` at line 1 column 2",
        );
        assert_eq!(msg, "title is required");
    }

    #[test]
    fn test_describe_invalid_type() {
        let msg = describe_data_error(
            "Failed to deserialize the JSON body into the target type: order: invalid type: string \"x\", expected i32",
        );
        assert_eq!(msg, "Invalid field type in request");
    }
}
