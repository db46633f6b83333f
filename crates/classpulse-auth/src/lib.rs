//! # ClassPulse Auth
//!
//! Admin token claims and JWT utilities.
//!
//! - [`claims`]: the [`Claims`] embedded in every admin token
//! - [`jwt`]: issuing and verifying HS256 tokens
//!
//! Tokens live for `JWT_EXPIRY` seconds (24 hours by default). There are no
//! refresh tokens; logging out is an acknowledgement only.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, create_access_token_at, verify_token};
