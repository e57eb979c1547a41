use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    config::{ClientSettings, SettingsError, DEFAULT_END_REACHED_THRESHOLD},
    scroll::{EndReachedDetector, ScrollMetrics},
    source::{HttpJobSource, JobSource},
    state::{JobListView, PageState, SkipReason},
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Result of a single [`JobListController::request_next_page`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Skipped(SkipReason),
    Appended { page: u32, count: usize },
    Exhausted { page: u32 },
    Failed { page: u32 },
    /// The fetch finished after the controller was unmounted.
    Discarded { page: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobListEvent {
    LoadingStarted { page: u32 },
    PageAppended { page: u32, count: usize },
    EndOfList { page: u32 },
    FetchFailed { page: u32, message: String },
    Unmounted,
}

/// Owns pagination state for one job list and turns UI intents into page
/// fetches. `is_loading` keeps at most one fetch outstanding, so merges never
/// interleave.
pub struct JobListController {
    source: Arc<dyn JobSource>,
    state: Mutex<PageState>,
    end_reached: Mutex<EndReachedDetector>,
    active: AtomicBool,
    events: broadcast::Sender<JobListEvent>,
}

impl JobListController {
    pub fn new(source: Arc<dyn JobSource>) -> Arc<Self> {
        Self::with_end_reached_threshold(source, DEFAULT_END_REACHED_THRESHOLD)
    }

    pub fn with_end_reached_threshold(source: Arc<dyn JobSource>, threshold: f32) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            source,
            state: Mutex::new(PageState::new()),
            end_reached: Mutex::new(EndReachedDetector::new(threshold)),
            active: AtomicBool::new(true),
            events,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Arc<Self>, SettingsError> {
        let source = HttpJobSource::from_settings(settings)?;
        info!(endpoint = %source.endpoint(), results_field = %settings.results_field, "jobs: controller configured");
        Ok(Self::with_end_reached_threshold(
            Arc::new(source),
            settings.end_reached_threshold,
        ))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobListEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> JobListView {
        self.state.lock().await.view()
    }

    pub async fn page_state(&self) -> PageState {
        self.state.lock().await.clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Loads the next page unless a fetch is already outstanding, the list is
    /// exhausted, or the controller was unmounted. Failures are recorded in
    /// the state and never returned as errors.
    pub async fn request_next_page(&self) -> FetchOutcome {
        let page = {
            let mut state = self.state.lock().await;
            if !self.is_active() {
                debug!("jobs: page request after unmount ignored");
                return FetchOutcome::Skipped(SkipReason::Unmounted);
            }
            if let Err(reason) = state.check_can_request() {
                debug!(?reason, next_page = state.next_page, "jobs: page request skipped");
                return FetchOutcome::Skipped(reason);
            }
            let page = state.begin_fetch();
            self.publish(JobListEvent::LoadingStarted { page });
            page
        };

        info!(page, "jobs: fetching page");
        let result = self.source.fetch_page(page).await;

        let mut state = self.state.lock().await;
        if !self.is_active() {
            debug!(page, "jobs: discarding page that arrived after unmount");
            return FetchOutcome::Discarded { page };
        }

        match result {
            Ok(jobs) if jobs.is_empty() => {
                state.mark_exhausted();
                info!(page, total = state.items.len(), "jobs: end of list");
                self.publish(JobListEvent::EndOfList { page });
                FetchOutcome::Exhausted { page }
            }
            Ok(jobs) => {
                let count = jobs.len();
                state.append_page(jobs);
                info!(page, count, total = state.items.len(), "jobs: page appended");
                self.publish(JobListEvent::PageAppended { page, count });
                FetchOutcome::Appended { page, count }
            }
            Err(err) => {
                warn!(page, "jobs: page fetch failed: {err}");
                let message = err.user_message().to_string();
                state.record_failure(message.clone());
                self.publish(JobListEvent::FetchFailed { page, message });
                FetchOutcome::Failed { page }
            }
        }
    }

    pub async fn on_mount(&self) -> FetchOutcome {
        self.request_next_page().await
    }

    pub async fn on_end_reached(&self) -> FetchOutcome {
        self.request_next_page().await
    }

    /// Retry action bound to the error banner.
    pub async fn on_retry(&self) -> FetchOutcome {
        self.request_next_page().await
    }

    /// Feeds scroll geometry through the end-reached detector. Returns `None`
    /// when the position does not count as a new end-reached intent.
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> Option<FetchOutcome> {
        if !self.observe_scroll(metrics).await {
            return None;
        }
        Some(self.on_end_reached().await)
    }

    /// Detector step of [`Self::on_scroll`] without the fetch. Callers that
    /// run the fetch elsewhere must still observe positions in the order the
    /// user produced them.
    pub async fn observe_scroll(&self, metrics: ScrollMetrics) -> bool {
        self.end_reached.lock().await.observe(metrics)
    }

    /// Tears the controller down. Fetches still in flight run to completion
    /// but their results are dropped, and later requests are ignored.
    pub fn unmount(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("jobs: controller unmounted");
            self.publish(JobListEvent::Unmounted);
        }
    }

    fn publish(&self, event: JobListEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
