use std::sync::Arc;

use axum::{Router, routing::post};
use classpulse_config::RateLimitConfig;
use tower_governor::GovernorLayer;

use super::controller::{get_feedback_stats, submit_feedback};
use crate::state::AppState;

pub fn init_feedback_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let submit = match rate_limit.feedback_governor_config() {
        Some(governor) => post(submit_feedback).layer(GovernorLayer::new(Arc::new(governor))),
        None => post(submit_feedback),
    };

    Router::new().route("/", submit.get(get_feedback_stats))
}
