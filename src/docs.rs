use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use classpulse_core::{ErrorBody, ErrorEnvelope, PageParams, PaginationMeta};
use classpulse_models::admin::{AdminProfile, LoginRequest, LoginResponse, VerifyResponse};
use classpulse_models::daily_reviews::{
    CreateDailyReviewDto, DailyReview, PaginatedDailyReviews, ReviewAuthor, UpdateDailyReviewDto,
};
use classpulse_models::feedback::{
    AdminFeedbackList, CreateFeedbackDto, DailyStat, DashboardData, DashboardOverview,
    DashboardStats, DashboardTrends, DeviceCount, DeviceType, ExportFormat, FeedbackCreated,
    FeedbackExport, PaceCount, PublicFeedbackStats, RealWorldTopicsCount, RecentFeedback,
    RoundedAverages, StudentFeedback, TeachingPace, TopicCount,
};
use classpulse_models::questions::{
    CreateQuestionDto, Question, QuestionType, UpdateQuestionDto,
};

use crate::modules::health::controller::HealthStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::feedback::controller::submit_feedback,
        crate::modules::feedback::controller::get_feedback_stats,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::verify,
        crate::modules::admin::controller::list_feedback,
        crate::modules::admin::controller::delete_feedback,
        crate::modules::admin::controller::dashboard,
        crate::modules::admin::controller::export_feedback,
        crate::modules::questions::controller::list_active_questions,
        crate::modules::questions::controller::list_questions,
        crate::modules::questions::controller::create_question,
        crate::modules::questions::controller::update_question,
        crate::modules::questions::controller::delete_question,
        crate::modules::daily_reviews::controller::list_reviews,
        crate::modules::daily_reviews::controller::get_review,
        crate::modules::daily_reviews::controller::create_review,
        crate::modules::daily_reviews::controller::update_review,
        crate::modules::daily_reviews::controller::delete_review,
    ),
    components(
        schemas(
            ErrorEnvelope,
            ErrorBody,
            PageParams,
            PaginationMeta,
            HealthStatus,
            StudentFeedback,
            CreateFeedbackDto,
            FeedbackCreated,
            TeachingPace,
            DeviceType,
            PaceCount,
            DeviceCount,
            RealWorldTopicsCount,
            RecentFeedback,
            RoundedAverages,
            PublicFeedbackStats,
            AdminFeedbackList,
            DashboardOverview,
            DashboardStats,
            DailyStat,
            TopicCount,
            DashboardTrends,
            DashboardData,
            ExportFormat,
            FeedbackExport,
            AdminProfile,
            LoginRequest,
            LoginResponse,
            VerifyResponse,
            Question,
            QuestionType,
            CreateQuestionDto,
            UpdateQuestionDto,
            ReviewAuthor,
            DailyReview,
            PaginatedDailyReviews,
            CreateDailyReviewDto,
            UpdateDailyReviewDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Feedback", description = "Public feedback submission and statistics"),
        (name = "Authentication", description = "Admin login and token checks"),
        (name = "Admin", description = "Feedback administration, dashboard and export"),
        (name = "Questions", description = "Feedback question management"),
        (name = "Daily Reviews", description = "Dated teaching reviews written by admins")
    ),
    info(
        title = "ClassPulse API",
        version = "0.1.0",
        description = "Collects student feedback about teaching sessions and serves aggregated results to admins.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
