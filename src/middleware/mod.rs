//! Request middleware and extractors.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor and the `require_auth` layer
//!   guarding every `/api/admin` route.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token and stores the claims on the request
//! 3. Handlers that need the admin take `AuthUser` as an argument
//!
//! A missing token is `401 NO_TOKEN`; a malformed or forged one is
//! `403 INVALID_TOKEN`; an expired one is `403 TOKEN_EXPIRED`.

pub mod auth;
