//! # ClassPulse Core
//!
//! Core types, errors, and utilities for the ClassPulse API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type, stable error codes and HTTP conversion
//! - [`response`]: The `{success, data, timestamp}` envelope shared by every endpoint
//! - [`pagination`]: Page-based pagination parameters and metadata
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use classpulse_core::{AppError, ApiResponse, codes};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Feedback not found"))
//!     .with_code(codes::FEEDBACK_NOT_FOUND);
//!
//! let ok = ApiResponse::success(42).with_message("Done");
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::{AppError, codes};
pub use pagination::{PageParams, PaginationMeta};
pub use password::{
    hash_password, hash_password_with_cost, verify_dummy_password, verify_password,
};
pub use response::{ApiResponse, ErrorBody, ErrorEnvelope};
