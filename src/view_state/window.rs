//! Lazy message window: which suffix of the history is materialized.
//!
//! Histories at or below `LAZY_THRESHOLD` are displayed whole. Above it,
//! only a trailing window is materialized, growing toward the front in
//! `LOAD_MORE_STEP` increments as the user scrolls up. The window cursor
//! is plain instance state, deliberately outside anything that triggers
//! redisplay on its own: redisplay follows from the selection it produces.

use crate::model::{ConversationId, MessageRecord};
use crate::view_state::constants::{INITIAL_RENDER_COUNT, LAZY_THRESHOLD, LOAD_MORE_STEP};
use std::ops::Range;

/// Outcome of reconciling the window with the current history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSync {
    /// Nothing to do; the cursor is already valid.
    Unchanged,
    /// History is at or below the threshold; the full history is shown.
    Full,
    /// Lazy mode activated: the cursor was positioned at the initial
    /// trailing window.
    Activated,
    /// The conversation identity changed; the window was recomputed from
    /// scratch (auto-follow should be re-engaged by the caller).
    Switched,
}

/// Cursor into the history marking the first materialized message.
///
/// # Invariants
///
/// - `visible_start == 0` whenever `len <= LAZY_THRESHOLD`
/// - While initialized for one conversation, the cursor only decreases
///   (the window only grows); it resets on conversation switch or when
///   the history shrinks below the threshold
#[derive(Debug, Clone, Default)]
pub struct LazyWindow {
    /// Index of the first materialized message.
    visible_start: usize,
    /// Whether the initial trailing window was positioned for the
    /// current conversation.
    initialized: bool,
    /// Conversation the cursor belongs to.
    conversation: Option<ConversationId>,
}

impl LazyWindow {
    /// Create a window that has not seen any conversation yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first materialized message.
    pub fn visible_start(&self) -> usize {
        self.visible_start
    }

    /// Whether older history remains beyond the window's front edge.
    pub fn can_grow(&self) -> bool {
        self.visible_start > 0
    }

    /// Whether lazy windowing is engaged for a history of `len` messages.
    pub fn is_lazy(&self, len: usize) -> bool {
        len > LAZY_THRESHOLD
    }

    /// Reconcile the cursor with the current history.
    ///
    /// Call whenever the history length or conversation identity may have
    /// changed. Idempotent: repeated calls with the same inputs return
    /// `Unchanged`/`Full` without moving the cursor.
    pub fn sync(&mut self, conversation: &ConversationId, len: usize) -> WindowSync {
        let switched = self.conversation.as_ref() != Some(conversation);
        if switched {
            self.conversation = Some(conversation.clone());
            self.initialized = false;
            self.visible_start = 0;
        }

        if len <= LAZY_THRESHOLD {
            self.visible_start = 0;
            self.initialized = false;
            return if switched {
                WindowSync::Switched
            } else {
                WindowSync::Full
            };
        }

        if !self.initialized {
            self.visible_start = len.saturating_sub(INITIAL_RENDER_COUNT);
            self.initialized = true;
            return if switched {
                WindowSync::Switched
            } else {
                WindowSync::Activated
            };
        }

        WindowSync::Unchanged
    }

    /// Grow the window toward older history by one load-more step.
    ///
    /// Returns whether the cursor moved. A request with the cursor
    /// already at the front is a no-op.
    pub fn request_older(&mut self) -> bool {
        if self.visible_start == 0 {
            return false;
        }
        self.visible_start = self.visible_start.saturating_sub(LOAD_MORE_STEP);
        true
    }

    /// Index range of the materialized messages for a history of `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        if len <= LAZY_THRESHOLD {
            0..len
        } else {
            self.visible_start.min(len)..len
        }
    }

    /// The materialized suffix of `records`. Pure: no cursor movement.
    pub fn select<'a>(&self, records: &'a [MessageRecord]) -> &'a [MessageRecord] {
        &records[self.range(records.len())]
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
