use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use classpulse_auth::{Claims, verify_token};
use classpulse_core::{AppError, codes};
use uuid::Uuid;

use crate::metrics::track_jwt_validation;
use crate::state::AppState;

/// The authenticated admin, taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn admin_id(&self) -> Uuid {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let no_token = || {
        AppError::unauthorized(anyhow!("Access token is required")).with_code(codes::NO_TOKEN)
    };

    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(no_token)?;

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(
            AppError::forbidden(anyhow!("Invalid authorization header format"))
                .with_code(codes::INVALID_TOKEN),
        );
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(no_token());
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts)?;
        let result = verify_token(token, &state.jwt_config);
        track_jwt_validation(result.is_ok());

        Ok(AuthUser(result?))
    }
}

/// Rejects the request unless it carries a valid admin token. The verified
/// [`AuthUser`] is stored in the request extensions for handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request as HttpRequest, StatusCode};

    fn parts_with(header_value: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/api/admin/feedback");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_missing_header_is_no_token() {
        let err = bearer_token(&parts_with(None)).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, codes::NO_TOKEN);
    }

    #[test]
    fn test_empty_bearer_is_no_token() {
        let err = bearer_token(&parts_with(Some("Bearer "))).unwrap_err();
        assert_eq!(err.code, codes::NO_TOKEN);
    }

    #[test]
    fn test_wrong_scheme_is_invalid_token() {
        let err = bearer_token(&parts_with(Some("Basic YWRtaW46cGFzcw=="))).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, codes::INVALID_TOKEN);
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }
}
