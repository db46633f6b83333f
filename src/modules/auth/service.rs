use anyhow::anyhow;
use classpulse_auth::create_access_token;
use classpulse_config::JwtConfig;
use classpulse_core::{
    AppError, codes, hash_password_with_cost, verify_dummy_password, verify_password,
};
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::model::{AdminProfile, AdminUser, DEFAULT_ADMIN_ROLE, LoginRequest, LoginResponse};
use crate::metrics::{track_admin_login_failure, track_admin_login_success, track_jwt_issued};

const ADMIN_COLUMNS: &str = "id, username, password_hash, role, last_login, created_at";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db))]
    pub async fn find_by_username(
        db: &PgPool,
        username: &str,
    ) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(admin)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(admin)
    }

    /// Checks the password, stamps `last_login` and issues a token.
    #[instrument(skip(db, request, jwt_config), fields(username = request.username.as_deref()))]
    pub async fn login(
        db: &PgPool,
        request: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some((username, password)) = request.credentials() else {
            track_admin_login_failure("missing_credentials");
            return Err(
                AppError::bad_request(anyhow!("Username and password are required"))
                    .with_code(codes::MISSING_CREDENTIALS),
            );
        };

        let invalid = || AppError::unauthorized(anyhow!("Invalid username or password"));

        let Some(admin) = Self::find_by_username(db, username).await? else {
            verify_dummy_password(password);
            track_admin_login_failure("unknown_user");
            warn!("Login attempt for unknown admin");
            return Err(invalid());
        };

        if !verify_password(password, &admin.password_hash)? {
            track_admin_login_failure("wrong_password");
            warn!(admin_id = %admin.id, "Login attempt with wrong password");
            return Err(invalid());
        }

        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "UPDATE admin_users SET last_login = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(admin.id)
        .fetch_one(db)
        .await?;

        let token = create_access_token(admin.id, &admin.username, &admin.role, jwt_config)?;
        track_jwt_issued();
        track_admin_login_success();
        info!(admin_id = %admin.id, "Admin logged in");

        Ok(LoginResponse {
            token,
            user: AdminProfile::from(admin),
        })
    }

    /// Profile for a verified token; `404 USER_NOT_FOUND` once the admin is gone.
    #[instrument(skip(db))]
    pub async fn profile(db: &PgPool, admin_id: Uuid) -> Result<AdminProfile, AppError> {
        Self::find_by_id(db, admin_id)
            .await?
            .map(AdminProfile::from)
            .ok_or_else(|| {
                AppError::not_found(anyhow!("User not found")).with_code(codes::USER_NOT_FOUND)
            })
    }

    /// Creates a new admin. An existing username is a `409 DUPLICATE_ENTRY`.
    #[instrument(skip(db, password))]
    pub async fn create_admin(
        db: &PgPool,
        username: &str,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<AdminProfile, AppError> {
        if Self::find_by_username(db, username).await?.is_some() {
            return Err(AppError::conflict(anyhow!(
                "Admin user '{}' already exists",
                username
            )));
        }

        let password_hash = hash_password_with_cost(password, bcrypt_cost)?;
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "INSERT INTO admin_users (username, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(username)
        .bind(&password_hash)
        .bind(DEFAULT_ADMIN_ROLE)
        .fetch_one(db)
        .await?;

        info!(admin_id = %admin.id, "Admin user created");
        Ok(admin.into())
    }

    /// Sets the password of `username`, creating the admin if it does not exist.
    #[instrument(skip(db, password))]
    pub async fn upsert_admin_password(
        db: &PgPool,
        username: &str,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<AdminProfile, AppError> {
        let password_hash = hash_password_with_cost(password, bcrypt_cost)?;
        let admin = sqlx::query_as::<_, AdminUser>(&format!(
            "INSERT INTO admin_users (username, password_hash, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (username)
             DO UPDATE SET password_hash = EXCLUDED.password_hash, updated_at = NOW()
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(username)
        .bind(&password_hash)
        .bind(DEFAULT_ADMIN_ROLE)
        .fetch_one(db)
        .await?;

        info!(admin_id = %admin.id, "Admin password reset");
        Ok(admin.into())
    }
}
