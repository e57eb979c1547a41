use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::JobItem,
    error::FetchError,
    protocol::{decode_job_page, JobPageQuery},
};
use url::Url;

use crate::config::{ClientSettings, SettingsError};

/// Fetches one page of job postings. Pages are 1-based; an empty page means
/// there is nothing further to load.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Vec<JobItem>, FetchError>;
}

pub struct HttpJobSource {
    http: Client,
    endpoint: Url,
    results_field: String,
}

impl HttpJobSource {
    pub fn new(endpoint: Url, results_field: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            results_field: results_field.into(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, SettingsError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| SettingsError::HttpClient(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: settings.jobs_endpoint()?,
            results_field: settings.results_field.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<JobItem>, FetchError> {
        tracing::debug!(page, endpoint = %self.endpoint, "jobs: requesting page");
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&JobPageQuery { page })
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| FetchError::malformed(err.to_string()))?;
        decode_job_page(body, &self.results_field)
    }
}
