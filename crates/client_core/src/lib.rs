//! Paginated job-list client: HTTP page source, pagination state, and the
//! controller rendering layers drive through lifecycle intents.

pub mod config;
pub mod controller;
pub mod scroll;
pub mod source;
pub mod state;

pub use config::{load_settings, ClientSettings, SettingsError};
pub use controller::{FetchOutcome, JobListController, JobListEvent};
pub use scroll::{EndReachedDetector, ScrollMetrics};
pub use source::{HttpJobSource, JobSource};
pub use state::{ErrorBanner, JobListView, PageState, SkipReason};

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod source_tests;
