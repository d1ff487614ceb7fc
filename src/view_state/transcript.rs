//! Transcript view-state: composition of the scroll core.
//!
//! Owns the lazy window, the height index, the scroll geometry, and the
//! anchor controller, and sequences them into the per-frame pipeline:
//!
//! 1. `sync_history` - reconcile the window with the history props
//! 2. `relayout` - recompute heights, padding, and content height
//! 3. `after_layout` - the deferred scroll adjustment (anchor-restore
//!    before auto-follow), now that the geometry reflects the new layout
//!
//! Scroll input lands between frames via `scroll_by`; the scroll monitor
//! reads the resulting geometry and may call `begin_growth`.

use crate::model::ConversationHistory;
use crate::view_state::anchor::{ScrollAdjustment, ScrollAnchor};
use crate::view_state::chrome::ChromeTracker;
use crate::view_state::height_index::HeightIndex;
use crate::view_state::layout;
use crate::view_state::metrics::ScrollMetrics;
use crate::view_state::window::{LazyWindow, WindowSync};
use std::ops::Range;

/// A materialized message intersecting the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSlot {
    /// Index of the message in the full history.
    pub history_index: usize,
    /// Row of the bubble's top edge relative to the viewport top.
    /// Negative when the bubble is partially scrolled off above.
    pub top_row: isize,
    /// Bubble height in rows.
    pub height: u16,
}

/// Scroll-management state for one transcript pane.
#[derive(Debug, Clone)]
pub struct TranscriptViewState {
    /// Materialized-suffix cursor.
    window: LazyWindow,
    /// Pending anchor + programmatic offset adjustment.
    anchor: ScrollAnchor,
    /// Heights of the materialized messages, window-relative.
    heights: HeightIndex,
    /// Scroll container geometry.
    metrics: ScrollMetrics,
    /// Floating chrome heights republished as padding.
    chrome: ChromeTracker,
    /// Whether new content snaps the viewport to the bottom.
    auto_follow: bool,
    /// Width the heights were computed at.
    last_width: Option<u16>,
    /// Window range the heights were computed for.
    last_range: Range<usize>,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    /// Create view-state for an untouched pane. Auto-follow starts
    /// engaged.
    pub fn new() -> Self {
        Self {
            window: LazyWindow::new(),
            anchor: ScrollAnchor::new(),
            heights: HeightIndex::new(64),
            metrics: ScrollMetrics::default(),
            chrome: ChromeTracker::new(),
            auto_follow: true,
            last_width: None,
            last_range: 0..0,
        }
    }

    /// The lazy window cursor.
    pub fn window(&self) -> &LazyWindow {
        &self.window
    }

    /// The scroll container geometry.
    pub fn metrics(&self) -> &ScrollMetrics {
        &self.metrics
    }

    /// The chrome tracker.
    pub fn chrome(&self) -> &ChromeTracker {
        &self.chrome
    }

    /// Mutable chrome tracker, for recording measurements.
    pub fn chrome_mut(&mut self) -> &mut ChromeTracker {
        &mut self.chrome
    }

    /// Whether auto-follow is currently engaged.
    pub fn auto_follow(&self) -> bool {
        self.auto_follow
    }

    /// Set the auto-follow flag (recomputed from scratch by the monitor
    /// on every scroll sample).
    pub fn set_auto_follow(&mut self, engaged: bool) {
        self.auto_follow = engaged;
    }

    /// Whether a growth anchor awaits the next layout pass.
    pub fn anchor_pending(&self) -> bool {
        self.anchor.has_pending()
    }

    /// Phase 1: reconcile the window with the history props.
    ///
    /// A conversation switch re-engages auto-follow and discards any
    /// anchor snapshotted against the previous conversation's layout.
    pub fn sync_history(&mut self, history: &ConversationHistory) -> WindowSync {
        let sync = self
            .window
            .sync(history.conversation_id(), history.len());
        if sync == WindowSync::Switched {
            self.auto_follow = true;
            self.anchor.discard();
            // Another conversation's records may occupy the same index
            // range; force the next relayout to re-measure everything.
            self.last_width = None;
        }
        sync
    }

    /// Phase 2: recompute heights and content geometry for this frame.
    ///
    /// Heights are rebuilt when the window shape or wrap width changed;
    /// otherwise only the trailing message is re-measured (streaming
    /// grows nothing else).
    pub fn relayout(&mut self, history: &ConversationHistory, area_width: u16, area_height: u16) {
        let range = self.window.range(history.len());
        let records = &history.records()[range.clone()];

        if self.last_width != Some(area_width) || self.last_range != range {
            self.heights.rebuild(
                records
                    .iter()
                    .map(|r| layout::message_height(r, area_width).get() as usize),
            );
            self.last_width = Some(area_width);
            self.last_range = range;
        } else if let Some(tail) = records.last() {
            let j = self.heights.len() - 1;
            self.heights
                .set(j, layout::message_height(tail, area_width).get() as usize);
        }

        let content_height =
            self.chrome.padding_top() + self.heights.total() + self.chrome.padding_bottom();
        self.metrics.set_viewport_height(area_height as usize);
        self.metrics.set_content_height(content_height);
    }

    /// Phase 3: the deferred scroll adjustment for this frame.
    pub fn after_layout(&mut self) -> ScrollAdjustment {
        self.anchor.after_layout(&mut self.metrics, self.auto_follow)
    }

    /// Apply a user scroll delta (the platform role; programmatic writes
    /// go through the anchor controller).
    pub fn scroll_by(&mut self, delta: isize) {
        self.metrics.scroll_by(delta);
    }

    /// Snapshot the current geometry and grow the window one step.
    ///
    /// Refused while an earlier anchor is unconsumed or no older history
    /// remains; at most one anchor is outstanding at a time.
    pub fn begin_growth(&mut self) -> bool {
        if self.anchor.has_pending() || !self.window.can_grow() {
            return false;
        }
        self.anchor.snapshot(&self.metrics);
        self.window.request_older();
        true
    }

    /// Manual jump to the bottom; force-engages auto-follow.
    pub fn jump_to_bottom(&mut self) {
        ScrollAnchor::jump_to_bottom(&mut self.metrics);
        self.auto_follow = true;
    }

    /// Materialized messages intersecting the viewport, with their
    /// viewport-relative rows.
    pub fn visible_slots(&self, history_len: usize) -> Vec<VisibleSlot> {
        let top = self.metrics.top();
        let viewport = self.metrics.viewport_height();
        let padding_top = self.chrome.padding_top();
        let window_start = self.window.range(history_len).start;

        let first = if top <= padding_top {
            0
        } else {
            match self.heights.locate(top - padding_top) {
                Some(j) => j,
                None => return Vec::new(),
            }
        };

        let mut slots = Vec::new();
        for j in first..self.heights.len() {
            let y = padding_top + self.heights.offset_of(j);
            if y >= top + viewport {
                break;
            }
            slots.push(VisibleSlot {
                history_index: window_start + j,
                top_row: y as isize - top as isize,
                height: self.heights.height_at(j) as u16,
            });
        }
        slots
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
