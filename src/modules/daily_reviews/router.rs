use axum::{Router, routing::get};

use super::controller::{create_review, delete_review, get_review, list_reviews, update_review};
use crate::state::AppState;

/// `/api/admin/daily-reviews`, mounted behind `require_auth`.
pub fn init_daily_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}
