use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job identifier as sent by the listing endpoint, which uses both numeric
/// and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(i64),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for JobId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobItem {
    pub id: JobId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl JobItem {
    pub fn new(id: impl Into<JobId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: None,
            company: None,
            salary: None,
            created_at: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Location and company joined for a list row; empty when neither is known.
    pub fn subtitle(&self) -> String {
        [self.location.as_deref(), self.company.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        parse_posted_timestamp(self.created_at.as_deref()?)
    }

    pub fn posted_age_label(&self, now: DateTime<Utc>) -> Option<String> {
        let posted_at = self.posted_at()?;
        let days = (now - posted_at).num_days();
        Some(match days {
            i64::MIN..=0 => "today".to_string(),
            1 => "1 day ago".to_string(),
            days => format!("{days} days ago"),
        })
    }
}

/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.f]` form, which is
/// read as UTC.
pub fn parse_posted_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_numeric_and_text_ids_verbatim() {
        assert_eq!(JobId::from(42_i64).to_string(), "42");
        assert_eq!(JobId::from("job-7").to_string(), "job-7");
    }

    #[test]
    fn subtitle_skips_missing_parts() {
        let job = JobItem::new(1_i64, "Driver").with_location("Pune");
        assert_eq!(job.subtitle(), "Pune");

        let job = job.with_company("Acme Logistics");
        assert_eq!(job.subtitle(), "Pune | Acme Logistics");

        assert_eq!(JobItem::new(2_i64, "Cook").subtitle(), "");
    }

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let naive = parse_posted_timestamp("2024-03-01T10:15:30.123456").expect("naive");
        assert_eq!(naive.to_rfc3339(), "2024-03-01T10:15:30.123456+00:00");

        let offset = parse_posted_timestamp("2024-03-01T15:45:30+05:30").expect("offset");
        assert_eq!(offset.to_rfc3339(), "2024-03-01T10:15:30+00:00");

        assert!(parse_posted_timestamp("yesterday").is_none());
    }

    #[test]
    fn age_label_counts_whole_days() {
        let now: DateTime<Utc> = "2024-03-04T12:00:00Z".parse().expect("now");
        let mut job = JobItem::new(1_i64, "Driver");
        assert_eq!(job.posted_age_label(now), None);

        job.created_at = Some("2024-03-04T08:00:00".to_string());
        assert_eq!(job.posted_age_label(now).as_deref(), Some("today"));

        job.created_at = Some("2024-03-03T08:00:00".to_string());
        assert_eq!(job.posted_age_label(now).as_deref(), Some("1 day ago"));

        job.created_at = Some("2024-03-01T08:00:00Z".to_string());
        assert_eq!(job.posted_age_label(now).as_deref(), Some("3 days ago"));
    }
}
