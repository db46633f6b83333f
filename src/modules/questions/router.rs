use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    create_question, delete_question, list_active_questions, list_questions, update_question,
};
use crate::state::AppState;

/// `GET /api/questions`
pub fn init_public_questions_router() -> Router<AppState> {
    Router::new().route("/", get(list_active_questions))
}

/// `/api/admin/questions`, mounted behind `require_auth`.
pub fn init_questions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_questions).post(create_question))
        .route("/{id}", put(update_question).delete(delete_question))
}
