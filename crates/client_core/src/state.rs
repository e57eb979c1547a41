use shared::domain::JobItem;

/// Why a page request did not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Loading,
    Exhausted,
    Unmounted,
}

/// Pagination state for one mounted job list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub items: Vec<JobItem>,
    pub next_page: u32,
    pub is_loading: bool,
    pub has_more: bool,
    pub last_error: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            is_loading: false,
            has_more: true,
            last_error: None,
        }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_can_request(&self) -> Result<(), SkipReason> {
        if self.is_loading {
            return Err(SkipReason::Loading);
        }
        if !self.has_more {
            return Err(SkipReason::Exhausted);
        }
        Ok(())
    }

    /// Marks a fetch as outstanding and returns the page it should request.
    pub(crate) fn begin_fetch(&mut self) -> u32 {
        self.is_loading = true;
        self.last_error = None;
        self.next_page
    }

    pub(crate) fn append_page(&mut self, jobs: Vec<JobItem>) {
        self.items.extend(jobs);
        self.next_page += 1;
        self.is_loading = false;
    }

    pub(crate) fn mark_exhausted(&mut self) {
        self.has_more = false;
        self.is_loading = false;
    }

    pub(crate) fn record_failure(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
        self.is_loading = false;
    }

    pub fn view(&self) -> JobListView {
        JobListView {
            items: self.items.clone(),
            show_footer_spinner: self.is_loading,
            show_empty_state: !self.is_loading && self.items.is_empty(),
            error_banner: self
                .last_error
                .as_deref()
                .filter(|message| !message.is_empty())
                .map(|message| ErrorBanner {
                    message: message.to_string(),
                }),
            has_more: self.has_more,
            next_page: self.next_page,
        }
    }
}

/// Error banner paired with a retry action in the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
}

/// Read-only projection of [`PageState`] that rendering layers draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListView {
    pub items: Vec<JobItem>,
    pub show_footer_spinner: bool,
    pub show_empty_state: bool,
    pub error_banner: Option<ErrorBanner>,
    pub has_more: bool,
    pub next_page: u32,
}

impl Default for JobListView {
    fn default() -> Self {
        PageState::default().view()
    }
}
