//! Field checks for a raw feedback submission.
//!
//! The body is inspected as untyped JSON so every problem can be reported at
//! once, including type mismatches a typed deserializer would stop at.
//! Each check is independent and messages keep field order.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::model::TeachingPace;

pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters long";
pub const NAME_INVALID_CHARS: &str = "Name can only contain letters and spaces";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const EMAIL_NOT_STRING: &str = "Email must be a valid string";
pub const TEACHING_SKILLS_RANGE: &str = "Teaching skills rating must be between 1 and 10";
pub const REAL_WORLD_EXPLANATION_RANGE: &str =
    "Real world explanation rating must be between 1 and 10";
pub const OVERALL_SATISFACTION_RANGE: &str = "Overall satisfaction rating must be between 1 and 10";
pub const REAL_WORLD_TOPICS_BOOL: &str = "Real world topics preference must be true or false";
pub const FUTURE_TOPICS_ARRAY: &str = "Future topics must be an array";
pub const FUTURE_TOPICS_TEXT: &str = "Future topics must only contain text";
pub const TEACHING_PACE_INVALID: &str = "Teaching pace must be TOO_FAST, PERFECT, or TOO_SLOW";
pub const COMMENTS_NOT_TEXT: &str = "Additional comments must be text";
pub const SESSION_DURATION_INVALID: &str =
    "Session duration must be a non-negative whole number of seconds";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("valid name pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackValidation {
    pub errors: Vec<String>,
}

impl FeedbackValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

const WHOLE_NUMBER_FIELDS: [&str; 4] = [
    "teachingSkills",
    "realWorldExplanation",
    "overallSatisfaction",
    "sessionDuration",
];

/// Integers, and floats with no fractional part such as `7.0`.
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

fn is_rating(value: Option<&Value>) -> bool {
    value
        .and_then(whole_number)
        .is_some_and(|n| (1..=10).contains(&n))
}

/// Rewrites whole-valued floats in the numeric fields as integers so a
/// validated body deserializes into integer fields.
pub fn normalize_whole_numbers(data: &mut Value) {
    let Some(fields) = data.as_object_mut() else {
        return;
    };
    for key in WHOLE_NUMBER_FIELDS {
        if let Some(value) = fields.get_mut(key) {
            if let Some(n) = whole_number(value) {
                *value = Value::from(n);
            }
        }
    }
}

/// `null` and a missing key are treated the same for optional fields.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

pub fn validate_feedback(data: &Value) -> FeedbackValidation {
    let mut errors: Vec<&'static str> = Vec::new();

    match data.get("name").and_then(Value::as_str).map(str::trim) {
        Some(name) if name.chars().count() >= 2 => {
            if !NAME_PATTERN.is_match(name) {
                errors.push(NAME_INVALID_CHARS);
            }
        }
        _ => errors.push(NAME_TOO_SHORT),
    }

    let has_phone = data
        .get("phoneNumber")
        .and_then(Value::as_str)
        .is_some_and(|p| !p.trim().is_empty());
    if !has_phone {
        errors.push(PHONE_REQUIRED);
    }

    if present(data.get("email")).is_some_and(|e| !e.is_string()) {
        errors.push(EMAIL_NOT_STRING);
    }

    if !is_rating(data.get("teachingSkills")) {
        errors.push(TEACHING_SKILLS_RANGE);
    }
    if !is_rating(data.get("realWorldExplanation")) {
        errors.push(REAL_WORLD_EXPLANATION_RANGE);
    }
    if !is_rating(data.get("overallSatisfaction")) {
        errors.push(OVERALL_SATISFACTION_RANGE);
    }

    if !data.get("realWorldTopics").is_some_and(Value::is_boolean) {
        errors.push(REAL_WORLD_TOPICS_BOOL);
    }

    match data.get("futureTopics") {
        Some(Value::Array(topics)) => {
            if !topics.iter().all(Value::is_string) {
                errors.push(FUTURE_TOPICS_TEXT);
            }
        }
        _ => errors.push(FUTURE_TOPICS_ARRAY),
    }

    let pace_ok = data
        .get("teachingPace")
        .and_then(Value::as_str)
        .is_some_and(|p| p.parse::<TeachingPace>().is_ok());
    if !pace_ok {
        errors.push(TEACHING_PACE_INVALID);
    }

    if present(data.get("additionalComments")).is_some_and(|c| !c.is_string()) {
        errors.push(COMMENTS_NOT_TEXT);
    }

    let duration_ok = match present(data.get("sessionDuration")) {
        None => true,
        Some(v) => whole_number(v).is_some_and(|secs| (0..=i64::from(i32::MAX)).contains(&secs)),
    };
    if !duration_ok {
        errors.push(SESSION_DURATION_INVALID);
    }

    FeedbackValidation {
        errors: errors.into_iter().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phoneNumber": "+2348012345678",
            "teachingSkills": 9,
            "realWorldExplanation": 8,
            "overallSatisfaction": 10,
            "realWorldTopics": true,
            "futureTopics": ["Async Rust", "Databases"],
            "teachingPace": "PERFECT",
            "additionalComments": "Great sessions",
            "sessionDuration": 240
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut data = valid();
        data[field] = value;
        data
    }

    #[test]
    fn test_valid_submission() {
        let result = validate_feedback(&valid());
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_optional_fields_may_be_absent_or_null() {
        let mut data = valid();
        let obj = data.as_object_mut().unwrap();
        obj.remove("email");
        obj.remove("additionalComments");
        obj.insert("sessionDuration".to_string(), Value::Null);
        assert!(validate_feedback(&data).is_valid());
    }

    #[test]
    fn test_only_offending_rating_is_reported() {
        let data = json!({
            "name": "Jo",
            "phoneNumber": "123",
            "teachingSkills": 11,
            "realWorldExplanation": 5,
            "overallSatisfaction": 5,
            "realWorldTopics": false,
            "futureTopics": [],
            "teachingPace": "TOO_SLOW"
        });
        let result = validate_feedback(&data);
        assert_eq!(result.errors, vec![TEACHING_SKILLS_RANGE.to_string()]);
    }

    #[test]
    fn test_ratings_must_be_integers_in_range() {
        for bad in [json!(0), json!(11), json!(7.5), json!("7"), Value::Null] {
            let result = validate_feedback(&with("overallSatisfaction", bad.clone()));
            assert_eq!(
                result.errors,
                vec![OVERALL_SATISFACTION_RANGE.to_string()],
                "value {bad}"
            );
        }
        for good in [1, 10] {
            assert!(validate_feedback(&with("realWorldExplanation", json!(good))).is_valid());
        }
    }

    #[test]
    fn test_whole_floats_count_as_integers() {
        assert!(validate_feedback(&with("teachingSkills", json!(7.0))).is_valid());
        assert!(validate_feedback(&with("sessionDuration", json!(120.0))).is_valid());
        assert_eq!(
            validate_feedback(&with("teachingSkills", json!(10.5))).errors,
            vec![TEACHING_SKILLS_RANGE]
        );
        assert_eq!(
            validate_feedback(&with("overallSatisfaction", json!(11.0))).errors,
            vec![OVERALL_SATISFACTION_RANGE]
        );
    }

    #[test]
    fn test_normalize_whole_numbers() {
        let mut data = with("teachingSkills", json!(7.0));
        data["sessionDuration"] = json!(60.0);
        data["name"] = json!("Ada");
        normalize_whole_numbers(&mut data);

        assert_eq!(data["teachingSkills"], json!(7));
        assert!(data["teachingSkills"].is_i64());
        assert_eq!(data["sessionDuration"], json!(60));
        assert_eq!(data["name"], "Ada");

        let dto: crate::modules::feedback::model::CreateFeedbackDto =
            serde_json::from_value(data).unwrap();
        assert_eq!(dto.teaching_skills, 7);
        assert_eq!(dto.session_duration, Some(60));
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(
            validate_feedback(&with("name", json!(" A "))).errors,
            vec![NAME_TOO_SHORT]
        );
        assert_eq!(
            validate_feedback(&with("name", json!(42))).errors,
            vec![NAME_TOO_SHORT]
        );
        assert_eq!(
            validate_feedback(&with("name", json!("R2-D2"))).errors,
            vec![NAME_INVALID_CHARS]
        );
        assert!(validate_feedback(&with("name", json!("Zoë Ángel"))).is_valid());
    }

    #[test]
    fn test_phone_required() {
        for bad in [json!(""), json!("   "), json!(12345), Value::Null] {
            assert_eq!(
                validate_feedback(&with("phoneNumber", bad)).errors,
                vec![PHONE_REQUIRED]
            );
        }
    }

    #[test]
    fn test_email_must_be_string_when_present() {
        assert_eq!(
            validate_feedback(&with("email", json!(true))).errors,
            vec![EMAIL_NOT_STRING]
        );
        assert!(validate_feedback(&with("email", Value::Null)).is_valid());
    }

    #[test]
    fn test_future_topics_rules() {
        assert_eq!(
            validate_feedback(&with("futureTopics", json!("Rust"))).errors,
            vec![FUTURE_TOPICS_ARRAY]
        );
        assert_eq!(
            validate_feedback(&with("futureTopics", json!(["Rust", 3]))).errors,
            vec![FUTURE_TOPICS_TEXT]
        );
    }

    #[test]
    fn test_teaching_pace_literals() {
        for bad in [json!("perfect"), json!("FAST"), json!(1)] {
            assert_eq!(
                validate_feedback(&with("teachingPace", bad)).errors,
                vec![TEACHING_PACE_INVALID]
            );
        }
    }

    #[test]
    fn test_session_duration_rules() {
        for bad in [json!(-1), json!(1.5), json!("60"), json!(i64::MAX)] {
            assert_eq!(
                validate_feedback(&with("sessionDuration", bad)).errors,
                vec![SESSION_DURATION_INVALID]
            );
        }
        assert!(validate_feedback(&with("sessionDuration", json!(0))).is_valid());
    }

    #[test]
    fn test_comments_must_be_text() {
        assert_eq!(
            validate_feedback(&with("additionalComments", json!(["a"]))).errors,
            vec![COMMENTS_NOT_TEXT]
        );
    }

    #[test]
    fn test_empty_body_collects_every_required_error() {
        let result = validate_feedback(&json!({}));
        assert_eq!(
            result.errors,
            vec![
                NAME_TOO_SHORT,
                PHONE_REQUIRED,
                TEACHING_SKILLS_RANGE,
                REAL_WORLD_EXPLANATION_RANGE,
                OVERALL_SATISFACTION_RANGE,
                REAL_WORLD_TOPICS_BOOL,
                FUTURE_TOPICS_ARRAY,
                TEACHING_PACE_INVALID,
            ]
        );
    }
}
