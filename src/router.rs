use std::sync::Arc;

use anyhow::anyhow;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use classpulse_config::CorsConfig;
use classpulse_core::{AppError, codes};
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::require_auth;
use crate::modules::admin::router::init_admin_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::daily_reviews::router::init_daily_reviews_router;
use crate::modules::feedback::router::init_feedback_router;
use crate::modules::health::router::init_health_router;
use crate::modules::questions::router::{init_public_questions_router, init_questions_router};
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::not_found(anyhow!("Endpoint not found"))
}

async fn method_not_allowed() -> AppError {
    AppError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        codes::METHOD_NOT_ALLOWED,
        anyhow!("Method not allowed"),
    )
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.allows_any() {
        // Credentials cannot be combined with a wildcard origin.
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let rate_limit = &state.rate_limit_config;

    let admin = Router::new()
        .merge(init_admin_router())
        .nest("/questions", init_questions_router())
        .nest("/daily-reviews", init_daily_reviews_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let mut api = Router::new()
        .nest("/health", init_health_router())
        .nest("/feedback", init_feedback_router(rate_limit))
        .nest("/auth", init_auth_router(rate_limit))
        .nest("/questions", init_public_questions_router())
        .nest("/admin", admin);

    if let Some(governor) = rate_limit.general_governor_config() {
        api = api.layer(GovernorLayer::new(Arc::new(governor)));
    }

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
