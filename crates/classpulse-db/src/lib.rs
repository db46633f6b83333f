//! # ClassPulse DB
//!
//! The process-wide PostgreSQL pool.
//!
//! One pool is created at startup, shared through application state and
//! closed during graceful shutdown. Handlers never open their own
//! connections.
//!
//! # Example
//!
//! ```ignore
//! use classpulse_config::DatabaseConfig;
//! use classpulse_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! if config.run_migrations {
//!     run_migrations(&pool).await?;
//! }
//! ```

use std::time::Duration;

use anyhow::Context;
use classpulse_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
}

/// Connects the shared pool, failing fast when the store is unreachable.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );
    Ok(pool)
}

/// Builds the pool without connecting; connections open on first use.
pub fn init_lazy_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    pool_options(config)
        .connect_lazy(&config.url)
        .context("Invalid DATABASE_URL")
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");
    Ok(())
}

/// Round-trips a trivial query; used by the health endpoint.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

pub async fn close_db_pool(pool: &PgPool) {
    pool.close().await;
    info!("Database pool closed");
}
