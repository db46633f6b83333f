//! Sample feedback for local development.
//!
//! Records are generated in parallel with Rayon, then written in
//! multi-row `INSERT` batches inside one transaction. Submission times are
//! spread over the last 30 days so the dashboard trends have data.

use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use classpulse_models::feedback::{DeviceType, TeachingPace};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

const BATCH_SIZE: usize = 500;
const COLUMNS_PER_ROW: usize = 14;

const TOPICS: [&str; 10] = [
    "Ownership and borrowing",
    "Async Rust",
    "Error handling",
    "Traits and generics",
    "Web APIs with Axum",
    "Databases with SQLx",
    "Testing",
    "Macros",
    "Concurrency",
    "Deployment",
];

const USER_AGENTS: [(&str, DeviceType); 4] = [
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/124.0 Safari/537.36",
        DeviceType::Desktop,
    ),
    (
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 Version/17.4 Safari/605.1.15",
        DeviceType::Desktop,
    ),
    (
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148",
        DeviceType::Mobile,
    ),
    (
        "Mozilla/5.0 (iPad; CPU OS 17_4 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148",
        DeviceType::Tablet,
    ),
];

#[derive(Debug, Clone)]
pub struct FeedbackSeed {
    pub name: String,
    pub email: Option<String>,
    pub phone_number: String,
    pub teaching_skills: i32,
    pub real_world_explanation: i32,
    pub overall_satisfaction: i32,
    pub real_world_topics: bool,
    pub future_topics: Vec<String>,
    pub teaching_pace: TeachingPace,
    pub additional_comments: String,
    pub device_type: DeviceType,
    pub browser_info: String,
    pub session_duration: i32,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    /// The table already had rows and `force` was not set.
    Skipped { existing: i64 },
}

fn fake_feedback(now: DateTime<Utc>) -> FeedbackSeed {
    let mut rng = rand::thread_rng();

    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let topic_count = rng.gen_range(0..=3);
    let future_topics = TOPICS
        .choose_multiple(&mut rng, topic_count)
        .map(|t| t.to_string())
        .collect();
    let (browser_info, device_type) = USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())];
    let teaching_pace = TeachingPace::ALL[rng.gen_range(0..TeachingPace::ALL.len())];

    FeedbackSeed {
        name: format!("{first} {last}"),
        email: rng.gen_bool(0.7).then(|| SafeEmail().fake()),
        phone_number: format!("+23480{:08}", rng.gen_range(0..100_000_000u32)),
        teaching_skills: rng.gen_range(5..=10),
        real_world_explanation: rng.gen_range(4..=10),
        overall_satisfaction: rng.gen_range(5..=10),
        real_world_topics: rng.gen_bool(0.6),
        future_topics,
        teaching_pace,
        additional_comments: if rng.gen_bool(0.5) {
            Sentence(4..12).fake()
        } else {
            String::new()
        },
        device_type,
        browser_info: browser_info.to_string(),
        session_duration: rng.gen_range(60..=900),
        submitted_at: now - Duration::minutes(rng.gen_range(0..30 * 24 * 60)),
    }
}

/// Generates `count` submissions across all CPU cores.
pub fn generate_feedback(count: usize) -> Vec<FeedbackSeed> {
    let now = Utc::now();
    (0..count)
        .into_par_iter()
        .map(|_| fake_feedback(now))
        .collect()
}

fn insert_statement(rows: usize) -> String {
    let mut query = String::from(
        "INSERT INTO student_feedback (name, email, phone_number, teaching_skills, \
         real_world_explanation, overall_satisfaction, real_world_topics, future_topics, \
         teaching_pace, additional_comments, device_type, browser_info, session_duration, \
         submitted_at) VALUES ",
    );

    for row in 0..rows {
        if row > 0 {
            query.push_str(", ");
        }
        let placeholders: Vec<String> = (1..=COLUMNS_PER_ROW)
            .map(|col| format!("${}", row * COLUMNS_PER_ROW + col))
            .collect();
        query.push('(');
        query.push_str(&placeholders.join(", "));
        query.push(')');
    }

    query
}

async fn insert_chunk(
    tx: &mut Transaction<'_, Postgres>,
    chunk: &[FeedbackSeed],
) -> anyhow::Result<u64> {
    if chunk.is_empty() {
        return Ok(0);
    }

    let sql = insert_statement(chunk.len());
    let mut query = sqlx::query(&sql);
    for seed in chunk {
        query = query
            .bind(&seed.name)
            .bind(&seed.email)
            .bind(&seed.phone_number)
            .bind(seed.teaching_skills)
            .bind(seed.real_world_explanation)
            .bind(seed.overall_satisfaction)
            .bind(seed.real_world_topics)
            .bind(&seed.future_topics)
            .bind(seed.teaching_pace)
            .bind(&seed.additional_comments)
            .bind(seed.device_type)
            .bind(&seed.browser_info)
            .bind(seed.session_duration)
            .bind(seed.submitted_at);
    }

    Ok(query.execute(&mut **tx).await?.rows_affected())
}

pub async fn seed_feedback(db: &PgPool, count: usize, force: bool) -> anyhow::Result<SeedOutcome> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM student_feedback")
        .fetch_one(db)
        .await?;
    if existing > 0 && !force {
        return Ok(SeedOutcome::Skipped { existing });
    }

    let start = Instant::now();
    let seeds = generate_feedback(count);

    let mut tx = db.begin().await?;
    let mut inserted = 0;
    for chunk in seeds.chunks(BATCH_SIZE) {
        inserted += insert_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    info!(inserted, elapsed_ms = start.elapsed().as_millis() as u64, "Feedback seeded");
    Ok(SeedOutcome::Inserted(inserted as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::feedback::device::classify_device;

    #[test]
    fn test_generated_feedback_is_in_range() {
        let seeds = generate_feedback(200);
        assert_eq!(seeds.len(), 200);

        let now = Utc::now();
        for seed in &seeds {
            for rating in [
                seed.teaching_skills,
                seed.real_world_explanation,
                seed.overall_satisfaction,
            ] {
                assert!((1..=10).contains(&rating));
            }
            assert!(seed.future_topics.len() <= 3);
            assert!(seed.session_duration >= 0);
            assert!(seed.submitted_at <= now);
            assert!(seed.submitted_at > now - Duration::days(31));
        }
    }

    #[test]
    fn test_sample_user_agents_match_their_device() {
        for (agent, device) in USER_AGENTS {
            assert_eq!(classify_device(agent), device, "{agent}");
        }
    }

    #[test]
    fn test_insert_statement_placeholders() {
        let sql = insert_statement(2);
        assert!(sql.contains("($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"));
        assert!(sql.ends_with("$28)"));
        assert_eq!(sql.matches('(').count(), 3);
    }
}
