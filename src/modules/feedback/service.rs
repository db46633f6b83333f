use chrono::{DateTime, Utc};
use classpulse_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    CreateFeedbackDto, DeviceCount, DeviceType, FeedbackCreated, PaceCount, PublicFeedbackStats,
    RatingSummary, RecentFeedback, StudentFeedback,
};

/// Every column of `student_feedback`, in [`StudentFeedback`] field order.
pub const FEEDBACK_COLUMNS: &str = "id, name, email, phone_number, teaching_skills, \
     real_world_explanation, overall_satisfaction, real_world_topics, future_topics, \
     teaching_pace, additional_comments, device_type, browser_info, session_duration, \
     submitted_at";

pub struct FeedbackService;

impl FeedbackService {
    #[instrument(skip(db, dto), fields(device_type = %device_type))]
    pub async fn create_feedback(
        db: &PgPool,
        dto: CreateFeedbackDto,
        device_type: DeviceType,
        browser_info: &str,
    ) -> Result<FeedbackCreated, AppError> {
        let dto = dto.normalized();

        let (id, submitted_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO student_feedback (
                name, email, phone_number, teaching_skills, real_world_explanation,
                overall_satisfaction, real_world_topics, future_topics, teaching_pace,
                additional_comments, device_type, browser_info, session_duration
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING id, submitted_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.phone_number)
        .bind(dto.teaching_skills)
        .bind(dto.real_world_explanation)
        .bind(dto.overall_satisfaction)
        .bind(dto.real_world_topics)
        .bind(&dto.future_topics)
        .bind(dto.teaching_pace)
        .bind(dto.additional_comments.unwrap_or_default())
        .bind(device_type)
        .bind(browser_info)
        .bind(dto.session_duration.unwrap_or(0))
        .fetch_one(db)
        .await?;

        Ok(FeedbackCreated { id, submitted_at })
    }

    #[instrument(skip(db))]
    pub async fn count(db: &PgPool) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_feedback")
            .fetch_one(db)
            .await?;
        Ok(total)
    }

    #[instrument(skip(db))]
    pub async fn average_ratings(db: &PgPool) -> Result<RatingSummary<f64>, AppError> {
        let (teaching_skills, real_world_explanation, overall_satisfaction) =
            sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
                "SELECT AVG(teaching_skills)::float8,
                        AVG(real_world_explanation)::float8,
                        AVG(overall_satisfaction)::float8
                 FROM student_feedback",
            )
            .fetch_one(db)
            .await?;

        Ok(RatingSummary {
            teaching_skills,
            real_world_explanation,
            overall_satisfaction,
        })
    }

    #[instrument(skip(db))]
    pub async fn pace_counts(db: &PgPool) -> Result<Vec<PaceCount>, AppError> {
        let counts = sqlx::query_as::<_, PaceCount>(
            "SELECT teaching_pace, COUNT(*) AS count
             FROM student_feedback
             GROUP BY teaching_pace
             ORDER BY teaching_pace",
        )
        .fetch_all(db)
        .await?;
        Ok(counts)
    }

    #[instrument(skip(db))]
    pub async fn device_counts(db: &PgPool) -> Result<Vec<DeviceCount>, AppError> {
        let counts = sqlx::query_as::<_, DeviceCount>(
            "SELECT device_type, COUNT(*) AS count
             FROM student_feedback
             GROUP BY device_type
             ORDER BY device_type",
        )
        .fetch_all(db)
        .await?;
        Ok(counts)
    }

    #[instrument(skip(db))]
    pub async fn recent(db: &PgPool, limit: i64) -> Result<Vec<RecentFeedback>, AppError> {
        let recent = sqlx::query_as::<_, RecentFeedback>(
            "SELECT id, name, overall_satisfaction, submitted_at
             FROM student_feedback
             ORDER BY submitted_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(db)
        .await?;
        Ok(recent)
    }

    #[instrument(skip(db))]
    pub async fn public_stats(db: &PgPool) -> Result<PublicFeedbackStats, AppError> {
        Ok(PublicFeedbackStats {
            total_feedback: Self::count(db).await?,
            average_ratings: Self::average_ratings(db).await?,
            teaching_pace_stats: Self::pace_counts(db).await?,
            device_stats: Self::device_counts(db).await?,
            recent_feedback: Self::recent(db, 5).await?,
        })
    }

    #[instrument(skip(db))]
    pub async fn list_page(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StudentFeedback>, AppError> {
        let feedback = sqlx::query_as::<_, StudentFeedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS}
             FROM student_feedback
             ORDER BY submitted_at DESC, id
             LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(feedback)
    }

    #[instrument(skip(db))]
    pub async fn list_all(db: &PgPool) -> Result<Vec<StudentFeedback>, AppError> {
        let feedback = sqlx::query_as::<_, StudentFeedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM student_feedback ORDER BY submitted_at DESC, id"
        ))
        .fetch_all(db)
        .await?;
        Ok(feedback)
    }

    /// Returns `false` when no row had that id.
    #[instrument(skip(db))]
    pub async fn delete_feedback(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM student_feedback WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
