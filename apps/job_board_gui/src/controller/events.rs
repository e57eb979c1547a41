//! Backend-to-UI events and error modeling for the job board window.

use client_core::JobListView;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    ViewUpdated(JobListView),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Configuration,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Startup and configuration failures leave no worker to talk to.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup | UiErrorContext::Configuration
        )
    }

    pub fn status_line(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => {
                format!("Backend worker startup failure: {}", self.message)
            }
            UiErrorContext::Configuration => {
                format!("Job source misconfigured: {}", self.message)
            }
        }
    }
}
