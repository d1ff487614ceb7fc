//! Viewport scroll monitor.
//!
//! Pure handler run against every scroll sample. Recomputes the
//! auto-follow flag from scratch (last writer wins under coalesced
//! events) and issues a window-growth request when the viewport is near
//! the top of the materialized window and older history remains.

use crate::view_state::constants::LOAD_MORE_TRIGGER;
use crate::view_state::transcript::TranscriptViewState;

/// What a scroll sample did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    /// Auto-follow flag after the sample.
    pub auto_follow: bool,
    /// Whether this sample issued a window-growth request.
    pub growth_requested: bool,
}

/// Handle one scroll sample against the transcript view-state.
///
/// `history_len` gates lazy mode; growth is requested only while the
/// window can still grow and no earlier growth anchor is unconsumed.
pub fn handle_scroll_sample(
    transcript: &mut TranscriptViewState,
    history_len: usize,
) -> ScrollSample {
    let auto_follow = transcript.metrics().is_near_bottom();
    transcript.set_auto_follow(auto_follow);

    let near_top = transcript.metrics().top() <= LOAD_MORE_TRIGGER;
    let growth_requested = transcript.window().is_lazy(history_len)
        && near_top
        && transcript.window().can_grow()
        && transcript.begin_growth();

    ScrollSample {
        auto_follow,
        growth_requested,
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "scroll_monitor_tests.rs"]
mod tests;
