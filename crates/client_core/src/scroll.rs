//! End-of-list detection for scroll containers.

/// Raw scroll geometry reported by a rendering layer, in any consistent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

impl ScrollMetrics {
    pub fn new(offset: f32, viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset,
            viewport_height,
            content_height,
        }
    }

    /// Content below the bottom edge of the viewport.
    pub fn remaining_below(&self) -> f32 {
        (self.content_height - self.offset - self.viewport_height).max(0.0)
    }

    /// True when the unseen content is at most `threshold` viewports tall.
    /// Degenerate geometry never counts as reaching the end.
    pub fn within_end_threshold(&self, threshold: f32) -> bool {
        let finite = self.offset.is_finite()
            && self.viewport_height.is_finite()
            && self.content_height.is_finite()
            && threshold.is_finite();
        if !finite || self.viewport_height <= 0.0 || threshold < 0.0 {
            return false;
        }
        self.remaining_below() <= threshold * self.viewport_height
    }
}

// Content heights closer than this are the same list length.
const CONTENT_HEIGHT_EPSILON: f32 = 0.5;

/// Fires once per content height while the viewport sits inside the end
/// threshold, and re-arms when it leaves the threshold. A list whose length
/// does not change (failed or empty fetch) therefore never re-fires on its own.
#[derive(Debug, Clone)]
pub struct EndReachedDetector {
    threshold: f32,
    fired_for_content_height: Option<f32>,
}

impl EndReachedDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            fired_for_content_height: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn observe(&mut self, metrics: ScrollMetrics) -> bool {
        if !metrics.within_end_threshold(self.threshold) {
            self.fired_for_content_height = None;
            return false;
        }

        let already_fired = self
            .fired_for_content_height
            .is_some_and(|height| (height - metrics.content_height).abs() < CONTENT_HEIGHT_EPSILON);
        if already_fired {
            return false;
        }

        self.fired_for_content_height = Some(metrics.content_height);
        true
    }
}
