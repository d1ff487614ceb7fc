//! Scroll container geometry.
//!
//! `ScrollMetrics` is the single shared mutable resource of the scroll
//! core: the (offset, content height, viewport height) triple of the
//! transcript's virtual document. The shell applies user scroll input to
//! it (the platform role); all programmatic adjustments go through
//! `ScrollAnchor`; the scroll monitor only reads it.

use crate::view_state::constants::NEAR_BOTTOM_THRESHOLD;

/// Geometry of the scrollable transcript area, in rows.
///
/// # Clamping Behavior
///
/// The scroll offset is clamped to `[0, max_top()]` on every write,
/// including writes caused by the content or viewport shrinking. No
/// combination of operations can produce a blank viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    /// Rows scrolled down from the top of the virtual document.
    top: usize,
    /// Total height of the virtual document (padding included).
    content_height: usize,
    /// Height of the visible viewport.
    viewport_height: usize,
}

impl ScrollMetrics {
    /// Create metrics for a document of the given geometry, scrolled to top.
    pub fn new(content_height: usize, viewport_height: usize) -> Self {
        Self {
            top: 0,
            content_height,
            viewport_height,
        }
    }

    /// Current scroll offset from the top.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Total content height.
    pub fn content_height(&self) -> usize {
        self.content_height
    }

    /// Viewport height.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Largest valid scroll offset.
    pub fn max_top(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Rows between the bottom edge of the viewport and the bottom of the
    /// content.
    pub fn distance_to_bottom(&self) -> usize {
        self.content_height
            .saturating_sub(self.top)
            .saturating_sub(self.viewport_height)
    }

    /// Whether the viewport is close enough to the bottom for auto-follow
    /// to stay engaged.
    pub fn is_near_bottom(&self) -> bool {
        self.distance_to_bottom() <= NEAR_BOTTOM_THRESHOLD
    }

    /// Set the scroll offset, clamped to the valid range.
    pub fn set_top(&mut self, top: usize) {
        self.top = top.min(self.max_top());
    }

    /// Apply a user scroll delta (negative scrolls toward the top).
    pub fn scroll_by(&mut self, delta: isize) {
        let next = if delta < 0 {
            self.top.saturating_sub(delta.unsigned_abs())
        } else {
            self.top.saturating_add(delta as usize)
        };
        self.set_top(next);
    }

    /// Snap the viewport to the bottom of the content.
    pub fn scroll_to_bottom(&mut self) {
        self.top = self.max_top();
    }

    /// Update the content height, re-clamping the offset.
    pub fn set_content_height(&mut self, content_height: usize) {
        self.content_height = content_height;
        self.top = self.top.min(self.max_top());
    }

    /// Update the viewport height, re-clamping the offset.
    pub fn set_viewport_height(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.top = self.top.min(self.max_top());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_top() {
        let metrics = ScrollMetrics::new(100, 24);
        assert_eq!(metrics.top(), 0);
        assert_eq!(metrics.max_top(), 76);
    }

    #[test]
    fn max_top_is_zero_when_viewport_exceeds_content() {
        let metrics = ScrollMetrics::new(10, 50);
        assert_eq!(metrics.max_top(), 0);
    }

    #[test]
    fn set_top_clamps_to_max() {
        let mut metrics = ScrollMetrics::new(100, 24);
        metrics.set_top(500);
        assert_eq!(metrics.top(), 76);
    }

    #[test]
    fn scroll_by_negative_saturates_at_zero() {
        let mut metrics = ScrollMetrics::new(100, 24);
        metrics.set_top(5);
        metrics.scroll_by(-10);
        assert_eq!(metrics.top(), 0);
    }

    #[test]
    fn scroll_by_positive_clamps_to_max() {
        let mut metrics = ScrollMetrics::new(100, 24);
        metrics.scroll_by(1000);
        assert_eq!(metrics.top(), 76);
    }

    #[test]
    fn distance_to_bottom_at_bottom_is_zero() {
        let mut metrics = ScrollMetrics::new(300, 24);
        metrics.scroll_to_bottom();
        assert_eq!(metrics.distance_to_bottom(), 0);
        assert!(metrics.is_near_bottom());
    }

    #[test]
    fn distance_to_bottom_from_top() {
        let metrics = ScrollMetrics::new(300, 24);
        assert_eq!(metrics.distance_to_bottom(), 276);
        assert!(!metrics.is_near_bottom());
    }

    #[test]
    fn near_bottom_boundary_is_inclusive() {
        let mut metrics = ScrollMetrics::new(1000, 24);
        metrics.set_top(1000 - 24 - NEAR_BOTTOM_THRESHOLD);
        assert_eq!(metrics.distance_to_bottom(), NEAR_BOTTOM_THRESHOLD);
        assert!(metrics.is_near_bottom());

        metrics.set_top(metrics.top() - 1);
        assert!(!metrics.is_near_bottom());
    }

    #[test]
    fn shrinking_content_re_clamps_offset() {
        let mut metrics = ScrollMetrics::new(300, 24);
        metrics.scroll_to_bottom();
        metrics.set_content_height(50);
        assert_eq!(metrics.top(), 26);
    }

    #[test]
    fn growing_viewport_re_clamps_offset() {
        let mut metrics = ScrollMetrics::new(100, 24);
        metrics.scroll_to_bottom();
        metrics.set_viewport_height(90);
        assert_eq!(metrics.top(), 10);
    }
}
