//! CSV rendering of the feedback export.
//!
//! One header row, then one row per record. Fields containing a comma, a
//! double quote or a line break are quoted, with inner quotes doubled.
//! Future topics are joined with `"; "` into a single field.

use chrono::{DateTime, SecondsFormat, Utc};

use super::model::StudentFeedback;

pub const CSV_HEADER: [&str; 15] = [
    "ID",
    "Name",
    "Email",
    "Phone Number",
    "Teaching Skills",
    "Real World Explanation",
    "Overall Satisfaction",
    "Real World Topics",
    "Future Topics",
    "Teaching Pace",
    "Additional Comments",
    "Device Type",
    "Browser Info",
    "Session Duration",
    "Submitted At",
];

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row: Vec<String> = fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn feedback_to_csv(feedback: &[StudentFeedback]) -> String {
    let mut out = String::new();
    write_row(&mut out, CSV_HEADER);

    for item in feedback {
        write_row(
            &mut out,
            [
                item.id.to_string(),
                item.name.clone(),
                item.email.clone().unwrap_or_default(),
                item.phone_number.clone(),
                item.teaching_skills.to_string(),
                item.real_world_explanation.to_string(),
                item.overall_satisfaction.to_string(),
                item.real_world_topics.to_string(),
                item.future_topics.join("; "),
                item.teaching_pace.to_string(),
                item.additional_comments.clone(),
                item.device_type.to_string(),
                item.browser_info.clone(),
                item.session_duration.to_string(),
                timestamp(item.submitted_at),
            ],
        );
    }

    out
}

/// `feedback-export-YYYY-MM-DD.<ext>`
pub fn export_filename(date: DateTime<Utc>, extension: &str) -> String {
    format!("feedback-export-{}.{}", date.format("%Y-%m-%d"), extension)
}
