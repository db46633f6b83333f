use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use classpulse_config::RateLimitConfig;
use tower_governor::GovernorLayer;

use super::controller::{login, logout, verify};
use crate::state::AppState;

pub fn init_auth_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let login_route = match rate_limit.auth_governor_config() {
        Some(governor) => post(login).layer(GovernorLayer::new(Arc::new(governor))),
        None => post(login),
    };

    Router::new()
        .route("/login", login_route)
        .route("/logout", post(logout))
        .route("/verify", get(verify))
}
