//! Admin token issuing and verification (HS256).
//!
//! Verification distinguishes an expired token (`403 TOKEN_EXPIRED`) from
//! any other failure such as a bad signature or a malformed token
//! (`403 INVALID_TOKEN`).
//!
//! # Example
//!
//! ```ignore
//! use classpulse_auth::{create_access_token, verify_token};
//! use classpulse_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(admin.id, &admin.username, &admin.role, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use classpulse_config::JwtConfig;
use classpulse_core::{AppError, codes};

use crate::claims::Claims;

pub fn create_access_token(
    admin_id: Uuid,
    username: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_access_token_at(admin_id, username, role, Utc::now(), jwt_config)
}

/// Issues a token as if it had been signed at `issued_at`.
pub fn create_access_token_at(
    admin_id: Uuid,
    username: &str,
    role: &str,
    issued_at: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let iat = issued_at.timestamp().max(0) as usize;
    let exp = iat + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        id: admin_id,
        username: username.to_string(),
        role: role.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            AppError::forbidden(anyhow::anyhow!("Token has expired")).with_code(codes::TOKEN_EXPIRED)
        }
        _ => AppError::forbidden(anyhow::anyhow!("Invalid token")).with_code(codes::INVALID_TOKEN),
    })
}
