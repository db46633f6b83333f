//! Student feedback models.
//!
//! A [`StudentFeedback`] is written once per submission and never edited;
//! admins may only delete it. The submission body is validated as raw JSON
//! before being turned into a [`CreateFeedbackDto`], so the DTO carries no
//! validator attributes of its own.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// How the student perceived the pace of the lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "teaching_pace", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeachingPace {
    TooFast,
    Perfect,
    TooSlow,
}

impl TeachingPace {
    pub const ALL: [TeachingPace; 3] = [Self::TooFast, Self::Perfect, Self::TooSlow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TooFast => "TOO_FAST",
            Self::Perfect => "PERFECT",
            Self::TooSlow => "TOO_SLOW",
        }
    }
}

impl FromStr for TeachingPace {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.as_str() == s).ok_or(())
    }
}

impl fmt::Display for TeachingPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device class derived from the submitting browser's user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "device_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "MOBILE",
            Self::Desktop => "DESKTOP",
            Self::Tablet => "TABLET",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeedback {
    pub id: Uuid,
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
    /// Seconds spent on the form
    pub session_duration: i32,
    pub submitted_at: DateTime<Utc>,
}

/// A validated submission.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackDto {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[schema(example = "+2348012345678")]
    pub phone_number: String,
    #[schema(minimum = 1, maximum = 10)]
    pub teaching_skills: i32,
    #[schema(minimum = 1, maximum = 10)]
    pub real_world_explanation: i32,
    #[schema(minimum = 1, maximum = 10)]
    pub overall_satisfaction: i32,
    pub real_world_topics: bool,
    pub future_topics: Vec<String>,
    pub teaching_pace: TeachingPace,
    #[serde(default)]
    pub additional_comments: Option<String>,
    #[serde(default)]
    pub session_duration: Option<i32>,
}

impl CreateFeedbackDto {
    /// Trims name, phone and email, treating a blank email as absent.
    /// Future topics are stored exactly as sent.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.phone_number = self.phone_number.trim().to_string();
        self.email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreated {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Per-question rating values; averages are `null` when there is no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary<T> {
    pub teaching_skills: Option<T>,
    pub real_world_explanation: Option<T>,
    pub overall_satisfaction: Option<T>,
}

/// Averages rounded to one decimal, `0` when there is no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundedAverages {
    pub teaching_skills: f64,
    pub real_world_explanation: f64,
    pub overall_satisfaction: f64,
}

/// Rounds to one decimal place; no data rounds to `0`.
pub fn round_one_decimal(value: Option<f64>) -> f64 {
    value.map_or(0.0, |v| (v * 10.0).round() / 10.0)
}

impl From<RatingSummary<f64>> for RoundedAverages {
    fn from(averages: RatingSummary<f64>) -> Self {
        Self {
            teaching_skills: round_one_decimal(averages.teaching_skills),
            real_world_explanation: round_one_decimal(averages.real_world_explanation),
            overall_satisfaction: round_one_decimal(averages.overall_satisfaction),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaceCount {
    pub teaching_pace: TeachingPace,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCount {
    pub device_type: DeviceType,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealWorldTopicsCount {
    pub real_world_topics: bool,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentFeedback {
    pub id: Uuid,
    pub name: String,
    pub overall_satisfaction: i32,
    pub submitted_at: DateTime<Utc>,
}

/// `GET /api/feedback`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicFeedbackStats {
    pub total_feedback: i64,
    pub average_ratings: RatingSummary<f64>,
    pub teaching_pace_stats: Vec<PaceCount>,
    pub device_stats: Vec<DeviceCount>,
    pub recent_feedback: Vec<RecentFeedback>,
}

/// `GET /api/admin/feedback`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminFeedbackList {
    pub feedback: Vec<StudentFeedback>,
    pub total_feedback: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub average_ratings: RoundedAverages,
    pub teaching_pace_stats: Vec<PaceCount>,
    pub device_stats: Vec<DeviceCount>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_feedback: i64,
    pub average_ratings: RatingSummary<f64>,
    pub min_ratings: RatingSummary<i32>,
    pub max_ratings: RatingSummary<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub teaching_pace: Vec<PaceCount>,
    pub device_type: Vec<DeviceCount>,
    pub real_world_topics: Vec<RealWorldTopicsCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: NaiveDate,
    pub count: i64,
    pub average_ratings: RatingSummary<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TopicCount {
    pub topic: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
    pub daily_stats: Vec<DailyStat>,
    pub most_requested_topics: Vec<TopicCount>,
}

/// `GET /api/admin/dashboard`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: DashboardOverview,
    pub stats: DashboardStats,
    pub recent_feedback: Vec<StudentFeedback>,
    pub trends: DashboardTrends,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// `json` (default) or `csv`
    pub format: Option<ExportFormat>,
}

/// Body of a JSON export attachment.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackExport {
    pub export_date: DateTime<Utc>,
    pub total_records: usize,
    pub feedback: Vec<StudentFeedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teaching_pace_parse() {
        assert_eq!("TOO_FAST".parse::<TeachingPace>(), Ok(TeachingPace::TooFast));
        assert_eq!("PERFECT".parse::<TeachingPace>(), Ok(TeachingPace::Perfect));
        assert!("perfect".parse::<TeachingPace>().is_err());
    }

    #[test]
    fn test_enums_serialize_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(TeachingPace::TooSlow).unwrap(),
            "TOO_SLOW"
        );
        assert_eq!(serde_json::to_value(DeviceType::Tablet).unwrap(), "TABLET");
    }

    #[test]
    fn test_create_dto_normalized() {
        let dto: CreateFeedbackDto = serde_json::from_value(serde_json::json!({
            "name": "  Ada Lovelace ",
            "email": "   ",
            "phoneNumber": " 0801 ",
            "teachingSkills": 9,
            "realWorldExplanation": 8,
            "overallSatisfaction": 10,
            "realWorldTopics": true,
            "futureTopics": ["Rust", "  ", " Async "],
            "teachingPace": "PERFECT"
        }))
        .unwrap();

        let dto = dto.normalized();
        assert_eq!(dto.name, "Ada Lovelace");
        assert_eq!(dto.phone_number, "0801");
        assert_eq!(dto.email, None);
        assert_eq!(dto.future_topics, vec!["Rust", "  ", " Async "]);
        assert_eq!(dto.session_duration, None);
    }

    #[test]
    fn test_feedback_serializes_camel_case() {
        let feedback = StudentFeedback {
            id: Uuid::nil(),
            name: "Ada".to_string(),
            email: None,
            phone_number: "123".to_string(),
            teaching_skills: 7,
            real_world_explanation: 6,
            overall_satisfaction: 8,
            real_world_topics: false,
            future_topics: vec![],
            teaching_pace: TeachingPace::Perfect,
            additional_comments: String::new(),
            device_type: DeviceType::Desktop,
            browser_info: "curl/8".to_string(),
            session_duration: 0,
            submitted_at: Utc::now(),
        };
        let value = serde_json::to_value(&feedback).unwrap();
        assert_eq!(value["phoneNumber"], "123");
        assert_eq!(value["teachingPace"], "PERFECT");
        assert_eq!(value["deviceType"], "DESKTOP");
        assert!(value.get("submittedAt").is_some());
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(None), 0.0);
        assert_eq!(round_one_decimal(Some(7.25)), 7.3);
        assert_eq!(round_one_decimal(Some(8.0)), 8.0);
        assert_eq!(round_one_decimal(Some(6.666_666)), 6.7);
    }

    #[test]
    fn test_rounded_averages_from_summary() {
        let rounded = RoundedAverages::from(RatingSummary {
            teaching_skills: Some(8.333),
            real_world_explanation: None,
            overall_satisfaction: Some(9.96),
        });
        assert_eq!(rounded.teaching_skills, 8.3);
        assert_eq!(rounded.real_world_explanation, 0.0);
        assert_eq!(rounded.overall_satisfaction, 10.0);
    }

    #[test]
    fn test_export_format_default_is_json() {
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
        let q: ExportFormat = serde_json::from_str(r#""csv""#).unwrap();
        assert_eq!(q, ExportFormat::Csv);
    }
}
