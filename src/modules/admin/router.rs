use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{dashboard, delete_feedback, export_feedback, list_feedback};
use crate::state::AppState;

/// Feedback administration. Mounted behind `require_auth`.
pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(list_feedback))
        .route("/feedback/{id}", delete(delete_feedback))
        .route("/dashboard", get(dashboard))
        .route("/export", get(export_feedback))
}
