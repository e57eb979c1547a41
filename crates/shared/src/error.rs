use thiserror::Error;

/// Banner text shown for every failed page fetch, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch jobs.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("job request failed: {0}")]
    Transport(String),
    #[error("job endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed job payload: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}
