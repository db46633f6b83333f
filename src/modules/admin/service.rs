use std::collections::HashMap;

use anyhow::anyhow;
use chrono::{Duration, NaiveDate, Utc};
use classpulse_core::{AppError, PageParams, codes, pagination::total_pages};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::model::{
    AdminFeedbackList, DailyStat, DashboardData, DashboardOverview, DashboardStats,
    DashboardTrends, RatingSummary, RealWorldTopicsCount, StudentFeedback, TopicCount,
};
use crate::modules::feedback::service::{FEEDBACK_COLUMNS, FeedbackService};

const TREND_WINDOW_DAYS: i64 = 30;
const TOP_TOPICS: usize = 10;
const DASHBOARD_RECENT: i64 = 10;

/// Counts every requested topic and keeps the most frequent, ties broken
/// alphabetically.
pub fn rank_topics<I, T>(submissions: I, top: usize) -> Vec<TopicCount>
where
    I: IntoIterator<Item = T>,
    T: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, i64> = HashMap::new();
    for topic in submissions.into_iter().flatten() {
        *counts.entry(topic).or_default() += 1;
    }

    let mut ranked: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, count)| TopicCount { topic, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    ranked.truncate(top);
    ranked
}

type DailyRow = (NaiveDate, i64, Option<f64>, Option<f64>, Option<f64>);
type RatingBounds = (
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
);

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db))]
    pub async fn list_feedback(
        db: &PgPool,
        params: &PageParams,
    ) -> Result<AdminFeedbackList, AppError> {
        let total_feedback = FeedbackService::count(db).await?;
        let feedback = FeedbackService::list_page(db, params.limit(), params.offset()).await?;
        let averages = FeedbackService::average_ratings(db).await?;

        Ok(AdminFeedbackList {
            feedback,
            total_feedback,
            current_page: params.page(),
            total_pages: total_pages(total_feedback, params.limit()),
            average_ratings: averages.into(),
            teaching_pace_stats: FeedbackService::pace_counts(db).await?,
            device_stats: FeedbackService::device_counts(db).await?,
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_feedback(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        if !FeedbackService::delete_feedback(db, id).await? {
            return Err(AppError::not_found(anyhow!("Feedback not found"))
                .with_code(codes::FEEDBACK_NOT_FOUND));
        }
        info!(feedback_id = %id, "Feedback deleted");
        Ok(())
    }

    #[instrument(skip(db))]
    async fn rating_bounds(
        db: &PgPool,
    ) -> Result<(RatingSummary<i32>, RatingSummary<i32>), AppError> {
        let row = sqlx::query_as::<_, RatingBounds>(
            "SELECT MIN(teaching_skills), MIN(real_world_explanation), MIN(overall_satisfaction),
                    MAX(teaching_skills), MAX(real_world_explanation), MAX(overall_satisfaction)
             FROM student_feedback",
        )
        .fetch_one(db)
        .await?;

        Ok((
            RatingSummary {
                teaching_skills: row.0,
                real_world_explanation: row.1,
                overall_satisfaction: row.2,
            },
            RatingSummary {
                teaching_skills: row.3,
                real_world_explanation: row.4,
                overall_satisfaction: row.5,
            },
        ))
    }

    #[instrument(skip(db))]
    async fn real_world_topics_counts(
        db: &PgPool,
    ) -> Result<Vec<RealWorldTopicsCount>, AppError> {
        let counts = sqlx::query_as::<_, RealWorldTopicsCount>(
            "SELECT real_world_topics, COUNT(*) AS count
             FROM student_feedback
             GROUP BY real_world_topics
             ORDER BY real_world_topics",
        )
        .fetch_all(db)
        .await?;
        Ok(counts)
    }

    /// Per-day counts and averages (UTC days), oldest first.
    #[instrument(skip(db))]
    async fn daily_stats(db: &PgPool, days: i64) -> Result<Vec<DailyStat>, AppError> {
        let since = Utc::now() - Duration::days(days);
        let rows = sqlx::query_as::<_, DailyRow>(
            "SELECT (submitted_at AT TIME ZONE 'UTC')::date AS day,
                    COUNT(*),
                    AVG(teaching_skills)::float8,
                    AVG(real_world_explanation)::float8,
                    AVG(overall_satisfaction)::float8
             FROM student_feedback
             WHERE submitted_at >= $1
             GROUP BY day
             ORDER BY day",
        )
        .bind(since)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, count, teaching, real_world, overall)| DailyStat {
                date,
                count,
                average_ratings: RatingSummary {
                    teaching_skills: teaching,
                    real_world_explanation: real_world,
                    overall_satisfaction: overall,
                },
            })
            .collect())
    }

    #[instrument(skip(db))]
    async fn most_requested_topics(db: &PgPool, days: i64) -> Result<Vec<TopicCount>, AppError> {
        let since = Utc::now() - Duration::days(days);
        let submissions = sqlx::query_scalar::<_, Vec<String>>(
            "SELECT future_topics FROM student_feedback WHERE submitted_at >= $1",
        )
        .bind(since)
        .fetch_all(db)
        .await?;

        Ok(rank_topics(submissions, TOP_TOPICS))
    }

    #[instrument(skip(db))]
    pub async fn dashboard(db: &PgPool) -> Result<DashboardData, AppError> {
        let (min_ratings, max_ratings) = Self::rating_bounds(db).await?;

        let overview = DashboardOverview {
            total_feedback: FeedbackService::count(db).await?,
            average_ratings: FeedbackService::average_ratings(db).await?,
            min_ratings,
            max_ratings,
        };

        let stats = DashboardStats {
            teaching_pace: FeedbackService::pace_counts(db).await?,
            device_type: FeedbackService::device_counts(db).await?,
            real_world_topics: Self::real_world_topics_counts(db).await?,
        };

        let recent_feedback = sqlx::query_as::<_, StudentFeedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM student_feedback ORDER BY submitted_at DESC LIMIT $1"
        ))
        .bind(DASHBOARD_RECENT)
        .fetch_all(db)
        .await?;

        let trends = DashboardTrends {
            daily_stats: Self::daily_stats(db, TREND_WINDOW_DAYS).await?,
            most_requested_topics: Self::most_requested_topics(db, TREND_WINDOW_DAYS).await?,
        };

        Ok(DashboardData {
            overview,
            stats,
            recent_feedback,
            trends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rank_topics_orders_by_count_then_name() {
        let ranked = rank_topics(
            vec![
                topics(&["Rust", "SQL"]),
                topics(&["Docker", "Rust"]),
                topics(&["SQL", "Rust", "Axum"]),
            ],
            10,
        );
        let summary: Vec<(&str, i64)> = ranked
            .iter()
            .map(|t| (t.topic.as_str(), t.count))
            .collect();
        assert_eq!(
            summary,
            vec![("Rust", 3), ("SQL", 2), ("Axum", 1), ("Docker", 1)]
        );
    }

    #[test]
    fn test_rank_topics_truncates() {
        let submissions: Vec<Vec<String>> = (0..15).map(|i| vec![format!("topic-{i:02}")]).collect();
        let ranked = rank_topics(submissions, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].topic, "topic-00");
    }

    #[test]
    fn test_rank_topics_empty() {
        assert!(rank_topics(Vec::<Vec<String>>::new(), 10).is_empty());
    }
}
