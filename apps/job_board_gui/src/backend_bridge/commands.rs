//! Backend commands queued from UI to backend worker.

use client_core::ScrollMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackendCommand {
    Mount,
    EndReached,
    Scrolled(ScrollMetrics),
    Retry,
    Unmount,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::EndReached => "end_reached",
            Self::Scrolled(_) => "scrolled",
            Self::Retry => "retry",
            Self::Unmount => "unmount",
        }
    }
}
