//! Scroll anchoring: post-layout offset adjustment.
//!
//! Exactly one of two adjustments may run after a layout pass, checked in
//! priority order: restoring a pending anchor (content was prepended above
//! the viewport) or following the bottom. The pending anchor is consumed
//! unconditionally once read, so a stale anchor can never suppress a later
//! auto-follow.

use crate::view_state::constants::JUMP_BOTTOM_OFFSET;
use crate::view_state::metrics::ScrollMetrics;

/// Geometry snapshot taken when a window-growth request is issued.
///
/// At most one instance is outstanding at a time; it lives from the
/// scroll event that triggered growth until the next post-layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAnchor {
    /// Content height at snapshot time.
    prev_content_height: usize,
    /// Scroll offset at snapshot time.
    prev_top: usize,
}

/// Which adjustment a post-layout pass performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAdjustment {
    /// A pending anchor was consumed and the offset compensated for the
    /// height change.
    Restored,
    /// The viewport snapped to the bottom.
    Followed,
    /// No adjustment was needed.
    None,
}

/// Owner of all programmatic scroll-offset decisions.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnchor {
    /// Snapshot awaiting the next layout pass, if any.
    pending: Option<PendingAnchor>,
}

impl ScrollAnchor {
    /// Create an anchor controller with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot is awaiting the next layout pass.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop a pending snapshot whose layout pass will never run
    /// (conversation switch).
    pub fn discard(&mut self) {
        self.pending = None;
    }

    /// Record the current geometry ahead of a window growth.
    pub fn snapshot(&mut self, metrics: &ScrollMetrics) {
        self.pending = Some(PendingAnchor {
            prev_content_height: metrics.content_height(),
            prev_top: metrics.top(),
        });
    }

    /// Run the post-layout adjustment for this pass.
    ///
    /// Anchor restoration takes priority over auto-follow and suppresses
    /// it for the pass; the pending snapshot is cleared even when the
    /// growth it anticipated changed nothing.
    pub fn after_layout(
        &mut self,
        metrics: &mut ScrollMetrics,
        auto_follow: bool,
    ) -> ScrollAdjustment {
        if let Some(pending) = self.pending.take() {
            let grown = metrics
                .content_height()
                .saturating_sub(pending.prev_content_height);
            metrics.set_top(pending.prev_top.saturating_add(grown));
            return ScrollAdjustment::Restored;
        }
        if auto_follow {
            metrics.scroll_to_bottom();
            return ScrollAdjustment::Followed;
        }
        ScrollAdjustment::None
    }

    /// Manual jump to the bottom, landing just above the floating
    /// composer. The caller re-engages auto-follow.
    pub fn jump_to_bottom(metrics: &mut ScrollMetrics) {
        metrics.set_top(metrics.max_top().saturating_sub(JUMP_BOTTOM_OFFSET));
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "anchor_tests.rs"]
mod tests;
