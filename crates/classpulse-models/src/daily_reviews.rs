//! Daily review models.
//!
//! At most one review exists per calendar date.

use chrono::{DateTime, NaiveDate, Utc};
use classpulse_core::PageParams;
use classpulse_core::pagination::{
    PaginationMeta, deserialize_optional_bool, deserialize_optional_i64,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyReview {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub author: ReviewAuthor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review joined with its author's username.
#[derive(Debug, FromRow)]
pub struct DailyReviewRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DailyReviewRow> for DailyReview {
    fn from(row: DailyReviewRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            date: row.date,
            tags: row.tags,
            is_published: row.is_published,
            author: ReviewAuthor {
                id: row.author_id,
                username: row.author_username,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DailyReviewFilter {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Only published (`true`) or only drafts (`false`)
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub published: Option<bool>,
}

impl DailyReviewFilter {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedDailyReviews {
    pub reviews: Vec<DailyReview>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDailyReviewDto {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    /// Calendar date the review covers (`YYYY-MM-DD`)
    pub date: NaiveDate,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDailyReviewDto {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_review_nests_author() {
        let author_id = Uuid::new_v4();
        let row = DailyReviewRow {
            id: Uuid::new_v4(),
            title: "Ownership day".to_string(),
            content: "Covered moves and borrows".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            tags: vec!["rust".to_string()],
            is_published: true,
            author_id,
            author_username: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let review = DailyReview::from(row);
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["author"]["id"], author_id.to_string());
        assert_eq!(value["author"]["username"], "admin");
        assert_eq!(value["isPublished"], true);
        assert_eq!(value["date"], "2024-05-01");
    }

    #[test]
    fn test_create_dto_parses_date() {
        let dto: CreateDailyReviewDto = serde_json::from_value(serde_json::json!({
            "title": "Traits",
            "content": "Generic bounds",
            "date": "2024-06-12"
        }))
        .unwrap();
        assert_eq!(dto.date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_filter_page_params() {
        let filter = DailyReviewFilter {
            page: Some(2),
            limit: Some(20),
            published: Some(true),
        };
        let params = filter.page_params();
        assert_eq!(params.offset(), 20);
    }
}
