use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    domain::{JobId, JobItem},
    error::FetchError,
};

/// Listing endpoint, relative to the API base URL.
pub const JOBS_PATH: &str = "common/jobs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPageQuery {
    pub page: u32,
}

#[derive(Debug, Deserialize)]
struct JobRecord {
    id: JobId,
    #[serde(default, deserialize_with = "optional_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    location: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    company: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    company_name: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    salary: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    created_on: Option<String>,
    #[serde(default)]
    primary_details: Option<PrimaryDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PrimaryDetails {
    #[serde(default, deserialize_with = "optional_text")]
    place: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    salary: Option<String>,
}

impl From<JobRecord> for JobItem {
    fn from(record: JobRecord) -> Self {
        let details = record.primary_details.unwrap_or_default();
        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            location: record.location.or(details.place),
            company: record.company.or(record.company_name),
            salary: details.salary.or(record.salary),
            created_at: record.created_at.or(record.created_on),
        }
    }
}

/// Strings and numbers become text; blanks, nulls and anything else are absent.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Pulls the job list out of a page response. The list lives under
/// `results_field`; an empty list marks the end of pagination.
pub fn decode_job_page(body: Value, results_field: &str) -> Result<Vec<JobItem>, FetchError> {
    let Value::Object(mut envelope) = body else {
        return Err(FetchError::malformed("response body is not a JSON object"));
    };
    let records = envelope.remove(results_field).ok_or_else(|| {
        FetchError::malformed(format!("response is missing the `{results_field}` field"))
    })?;
    let records: Vec<JobRecord> = serde_json::from_value(records).map_err(|err| {
        FetchError::malformed(format!(
            "`{results_field}` is not a list of job records: {err}"
        ))
    })?;
    Ok(records.into_iter().map(JobItem::from).collect())
}
