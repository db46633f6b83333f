use std::env;

use crate::env_or;

pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "classpulse-dev-secret-change-in-production".to_string()),
            access_token_expiry: env_or("JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY_SECS),
        }
    }
}
