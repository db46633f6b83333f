//! Administrative commands behind `classpulse-cli`.
//!
//! - [`create_admin`]: new admin account, refuses an existing username
//! - [`reset_admin_password`]: sets a password, creating the admin if needed
//! - [`check_database`]: row counts for every table
//! - [`seeder`]: sample feedback for local development

pub mod seeder;

use anyhow::{Context, bail};
use classpulse_models::admin::AdminProfile;
use sqlx::PgPool;

use crate::modules::auth::service::AuthService;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Usernames are trimmed; both values must be usable before touching the store.
pub fn validate_admin_credentials(username: &str, password: &str) -> anyhow::Result<()> {
    if username.trim().is_empty() {
        bail!("Username cannot be empty");
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters long");
    }
    Ok(())
}

pub async fn create_admin(
    db: &PgPool,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<AdminProfile> {
    validate_admin_credentials(username, password)?;
    AuthService::create_admin(db, username.trim(), password, bcrypt_cost)
        .await
        .map_err(|e| e.error)
        .context("Failed to create admin user")
}

pub async fn reset_admin_password(
    db: &PgPool,
    username: &str,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<AdminProfile> {
    validate_admin_credentials(username, password)?;
    AuthService::upsert_admin_password(db, username.trim(), password, bcrypt_cost)
        .await
        .map_err(|e| e.error)
        .context("Failed to reset admin password")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

const TABLES: [&str; 4] = [
    "admin_users",
    "student_feedback",
    "questions",
    "daily_reviews",
];

pub async fn check_database(db: &PgPool) -> anyhow::Result<Vec<TableCount>> {
    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let rows = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db)
            .await
            .with_context(|| format!("Failed to count rows in {table}"))?;
        counts.push(TableCount { table, rows });
    }
    Ok(counts)
}
