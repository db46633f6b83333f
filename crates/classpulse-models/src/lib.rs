//! # ClassPulse Models
//!
//! Entities, request DTOs and response shapes for the ClassPulse API.
//!
//! All JSON is camelCase; database columns are snake_case.
//!
//! # Modules
//!
//! - [`feedback`]: student feedback submissions and aggregate views
//! - [`admin`]: admin users, login and profile
//! - [`questions`]: configurable feedback questions
//! - [`daily_reviews`]: dated teaching reviews written by admins

pub mod admin;
pub mod daily_reviews;
pub mod feedback;
pub mod questions;

// Re-export commonly used types at crate root for convenience
pub use admin::{AdminProfile, AdminUser, LoginRequest, LoginResponse, VerifyResponse};
pub use daily_reviews::{
    CreateDailyReviewDto, DailyReview, DailyReviewFilter, PaginatedDailyReviews, ReviewAuthor,
    UpdateDailyReviewDto,
};
pub use feedback::{
    AdminFeedbackList, CreateFeedbackDto, DashboardData, DeviceType, FeedbackCreated,
    PublicFeedbackStats, StudentFeedback, TeachingPace,
};
pub use questions::{CreateQuestionDto, Question, QuestionType, UpdateQuestionDto};
