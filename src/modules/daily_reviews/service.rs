use anyhow::anyhow;
use classpulse_core::{AppError, PaginationMeta, codes};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::model::{
    CreateDailyReviewDto, DailyReview, DailyReviewFilter, DailyReviewRow, PaginatedDailyReviews,
    UpdateDailyReviewDto,
};

const REVIEW_SELECT: &str = "SELECT r.id, r.title, r.content, r.date, r.tags, r.is_published,
            r.author_id, a.username AS author_username, r.created_at, r.updated_at
     FROM daily_reviews r
     JOIN admin_users a ON a.id = r.author_id";

fn review_not_found() -> AppError {
    AppError::not_found(anyhow!("Daily review not found"))
        .with_code(codes::DAILY_REVIEW_NOT_FOUND)
}

pub struct DailyReviewService;

impl DailyReviewService {
    #[instrument(skip(db))]
    pub async fn list_reviews(
        db: &PgPool,
        filter: &DailyReviewFilter,
    ) -> Result<PaginatedDailyReviews, AppError> {
        let params = filter.page_params();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM daily_reviews WHERE ($1::boolean IS NULL OR is_published = $1)",
        )
        .bind(filter.published)
        .fetch_one(db)
        .await?;

        let rows = sqlx::query_as::<_, DailyReviewRow>(&format!(
            "{REVIEW_SELECT}
             WHERE ($1::boolean IS NULL OR r.is_published = $1)
             ORDER BY r.date DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(filter.published)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedDailyReviews {
            reviews: rows.into_iter().map(DailyReview::from).collect(),
            pagination: PaginationMeta::new(&params, total),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_review(db: &PgPool, id: Uuid) -> Result<DailyReview, AppError> {
        let row = sqlx::query_as::<_, DailyReviewRow>(&format!("{REVIEW_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(review_not_found)?;
        Ok(row.into())
    }

    #[instrument(skip(db, dto), fields(date = %dto.date))]
    pub async fn create_review(
        db: &PgPool,
        author_id: Uuid,
        dto: CreateDailyReviewDto,
    ) -> Result<DailyReview, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO daily_reviews (title, content, date, tags, is_published, author_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(dto.title.trim())
        .bind(&dto.content)
        .bind(dto.date)
        .bind(dto.tags.unwrap_or_default())
        .bind(dto.is_published.unwrap_or(false))
        .bind(author_id)
        .fetch_one(db)
        .await?;

        info!(review_id = %id, "Daily review created");
        Self::get_review(db, id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_review(
        db: &PgPool,
        id: Uuid,
        dto: UpdateDailyReviewDto,
    ) -> Result<DailyReview, AppError> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            "UPDATE daily_reviews SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                date = COALESCE($4, date),
                tags = COALESCE($5, tags),
                is_published = COALESCE($6, is_published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.content)
        .bind(dto.date)
        .bind(&dto.tags)
        .bind(dto.is_published)
        .fetch_optional(db)
        .await?;

        match updated {
            Some(id) => Self::get_review(db, id).await,
            None => Err(review_not_found()),
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_review(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM daily_reviews WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(review_not_found());
        }
        info!(review_id = %id, "Daily review deleted");
        Ok(())
    }
}
