//! Property-based tests for the scroll-anchored lazy window.
//!
//! These exercise the public core against its contract: window shape,
//! growth monotonicity, anchor-preserving adjustment, auto-follow
//! recomputation, and jump idempotence.

use chatpane::model::{ConversationHistory, ConversationId, MessageId, MessageRecord, Role};
use chatpane::state::handle_scroll_sample;
use chatpane::view_state::anchor::ScrollAdjustment;
use chatpane::view_state::constants::{
    INITIAL_RENDER_COUNT, LAZY_THRESHOLD, LOAD_MORE_STEP, NEAR_BOTTOM_THRESHOLD,
};
use chatpane::view_state::metrics::ScrollMetrics;
use chatpane::view_state::transcript::TranscriptViewState;
use chatpane::view_state::window::LazyWindow;
use proptest::prelude::*;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn make_history(conversation: &str, count: usize) -> ConversationHistory {
    let mut history =
        ConversationHistory::new(ConversationId::new(conversation).expect("valid id"));
    for i in 0..count {
        let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
        // Multi-line bodies so the materialized window is tall enough to
        // scroll well clear of the near-bottom zone.
        let text = (0..6)
            .map(|l| format!("message {i} line {l}"))
            .collect::<Vec<_>>()
            .join("\n");
        history
            .push(MessageRecord::new(
                MessageId::new(format!("m{i}")).expect("valid id"),
                role,
                text,
                Vec::new(),
            ))
            .expect("unique id");
    }
    history
}

fn run_frame(state: &mut TranscriptViewState, history: &ConversationHistory) -> ScrollAdjustment {
    state.sync_history(history);
    state.relayout(history, WIDTH, HEIGHT);
    state.after_layout()
}

proptest! {
    /// Histories at or below the threshold are always shown whole.
    #[test]
    fn short_history_shows_full_window(len in 0usize..=LAZY_THRESHOLD) {
        let mut window = LazyWindow::new();
        window.sync(&ConversationId::new("c1").expect("valid id"), len);

        prop_assert_eq!(window.visible_start(), 0);
        prop_assert_eq!(window.range(len), 0..len);
    }

    /// First activation materializes exactly the most recent
    /// INITIAL_RENDER_COUNT messages.
    #[test]
    fn first_activation_window_is_the_recent_suffix(len in LAZY_THRESHOLD + 1..400usize) {
        let mut window = LazyWindow::new();
        window.sync(&ConversationId::new("c1").expect("valid id"), len);

        let range = window.range(len);
        prop_assert_eq!(range.len(), INITIAL_RENDER_COUNT.min(len));
        prop_assert_eq!(range.end, len);
    }

    /// Each load-more request decreases the cursor by exactly one step,
    /// except the last, which floors at 0; the cursor never increases.
    #[test]
    fn growth_is_monotone_in_fixed_steps(len in LAZY_THRESHOLD + 1..400usize, requests in 0usize..30) {
        let mut window = LazyWindow::new();
        window.sync(&ConversationId::new("c1").expect("valid id"), len);

        let mut previous = window.visible_start();
        for _ in 0..requests {
            let moved = window.request_older();
            let current = window.visible_start();
            prop_assert!(current <= previous);
            if moved {
                prop_assert_eq!(current, previous.saturating_sub(LOAD_MORE_STEP));
            } else {
                prop_assert_eq!(previous, 0);
            }
            previous = current;
        }
    }

    /// After a growth adjustment, the offset delta equals the height
    /// delta: previously visible content stays visually stationary.
    #[test]
    fn anchor_restore_preserves_visual_position(
        prev_height in 200usize..2_000,
        growth in 1usize..600,
        top_fraction in 0.0f64..1.0,
    ) {
        let mut metrics = ScrollMetrics::new(prev_height, HEIGHT as usize);
        let top = (metrics.max_top() as f64 * top_fraction) as usize;
        metrics.set_top(top);

        let mut anchor = chatpane::view_state::anchor::ScrollAnchor::new();
        anchor.snapshot(&metrics);

        let top_before = metrics.top();
        let height_before = metrics.content_height();
        metrics.set_content_height(prev_height + growth);
        let adjustment = anchor.after_layout(&mut metrics, true);

        prop_assert_eq!(adjustment, ScrollAdjustment::Restored);
        prop_assert_eq!(
            metrics.top() - top_before,
            metrics.content_height() - height_before
        );
    }

    /// The auto-follow flag equals "distance to bottom at most the
    /// near-bottom threshold" after every sample, wherever the viewport
    /// was before.
    #[test]
    fn auto_follow_matches_distance_to_bottom(top_fraction in 0.0f64..1.0) {
        let history = make_history("c1", 100);
        let mut state = TranscriptViewState::new();
        run_frame(&mut state, &history);

        // Move somewhere arbitrary within the real geometry.
        let target = (state.metrics().max_top() as f64 * top_fraction) as usize;
        let delta = target as isize - state.metrics().top() as isize;
        state.scroll_by(delta);

        let sample = handle_scroll_sample(&mut state, history.len());
        let expected = state.metrics().distance_to_bottom() <= NEAR_BOTTOM_THRESHOLD;

        prop_assert_eq!(sample.auto_follow, expected);
        prop_assert_eq!(state.auto_follow(), expected);
    }

    /// Jumping to the bottom twice without a content change lands on the
    /// same offset.
    #[test]
    fn jump_to_bottom_is_idempotent(content in 30usize..3_000, viewport in 5usize..60) {
        let mut metrics = ScrollMetrics::new(content, viewport);

        chatpane::view_state::anchor::ScrollAnchor::jump_to_bottom(&mut metrics);
        let first = metrics.top();
        chatpane::view_state::anchor::ScrollAnchor::jump_to_bottom(&mut metrics);

        prop_assert_eq!(metrics.top(), first);
    }

    /// Switching conversations always re-initializes to the trailing
    /// window, whatever the prior cursor was.
    #[test]
    fn conversation_switch_reinitializes(
        first_len in LAZY_THRESHOLD + 1..300usize,
        second_len in LAZY_THRESHOLD + 1..300usize,
        grow_requests in 0usize..10,
    ) {
        let mut window = LazyWindow::new();
        window.sync(&ConversationId::new("c1").expect("valid id"), first_len);
        for _ in 0..grow_requests {
            window.request_older();
        }

        window.sync(&ConversationId::new("c2").expect("valid id"), second_len);

        prop_assert_eq!(
            window.visible_start(),
            second_len - INITIAL_RENDER_COUNT.min(second_len)
        );
    }
}

// ===== Reference scenarios =====

#[test]
fn scenario_hundred_messages_grows_to_front() {
    let history = make_history("c1", 100);
    let mut state = TranscriptViewState::new();
    run_frame(&mut state, &history);

    // Initial window: the last 40 messages.
    assert_eq!(state.window().range(100), 60..100);

    // One load-more: 20 older messages join.
    state.scroll_by(-(state.metrics().top() as isize));
    assert!(handle_scroll_sample(&mut state, 100).growth_requested);
    run_frame(&mut state, &history);
    assert_eq!(state.window().range(100), 40..100);

    // Five more reach the front; further requests are no-ops.
    for _ in 0..5 {
        state.scroll_by(-(state.metrics().top() as isize));
        handle_scroll_sample(&mut state, 100);
        run_frame(&mut state, &history);
    }
    assert_eq!(state.window().range(100), 0..100);

    state.scroll_by(-(state.metrics().top() as isize));
    let sample = handle_scroll_sample(&mut state, 100);
    assert!(!sample.growth_requested);
    assert_eq!(state.window().range(100), 0..100);
}

#[test]
fn scenario_thirty_messages_never_window() {
    let mut history = make_history("c1", 30);
    let mut state = TranscriptViewState::new();
    run_frame(&mut state, &history);

    assert_eq!(state.window().range(30), 0..30);

    // Appending a 31st keeps full-history display.
    history
        .push(MessageRecord::new(
            MessageId::new("m30").expect("valid id"),
            Role::User,
            "the thirty-first message",
            Vec::new(),
        ))
        .expect("unique id");
    run_frame(&mut state, &history);

    assert_eq!(state.window().range(31), 0..31);
    assert_eq!(state.window().visible_start(), 0);
}
