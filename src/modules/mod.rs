pub mod admin;
pub mod auth;
pub mod daily_reviews;
pub mod feedback;
pub mod health;
pub mod questions;
