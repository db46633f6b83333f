use classpulse_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ServerConfig};
use classpulse_db::{init_db_pool, run_migrations};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    /// State around an existing pool, remaining settings from the environment.
    pub fn with_pool(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            server_config: ServerConfig::from_env(),
        }
    }
}

/// Connects the shared pool (running pending migrations when enabled) and
/// loads every config section.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&database_config).await?;

    if database_config.run_migrations {
        run_migrations(&db).await?;
    }

    Ok(AppState::with_pool(db))
}
