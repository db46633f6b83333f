//! Admin token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims carried by an admin access token.
///
/// Everything needed to identify the admin is embedded, so only `verify`
/// goes back to the store (to confirm the admin still exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Admin user id
    pub id: Uuid,
    pub username: String,
    pub role: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiry (Unix timestamp)
    pub exp: usize,
}
