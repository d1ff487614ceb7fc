//! Tests for the transcript frame pipeline.

use super::*;
use crate::model::{ConversationId, MessageId, MessageRecord, Role};
use crate::view_state::constants::{INITIAL_RENDER_COUNT, LAZY_THRESHOLD};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn make_history(conversation: &str, count: usize) -> ConversationHistory {
    let mut history =
        ConversationHistory::new(ConversationId::new(conversation).expect("valid id"));
    for i in 0..count {
        let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
        history
            .push(MessageRecord::new(
                MessageId::new(format!("m{i}")).expect("valid id"),
                role,
                format!("message number {i}"),
                Vec::new(),
            ))
            .expect("unique id");
    }
    history
}

/// Run one full frame: sync, relayout, post-layout adjustment.
fn run_frame(state: &mut TranscriptViewState, history: &ConversationHistory) -> ScrollAdjustment {
    state.sync_history(history);
    state.relayout(history, WIDTH, HEIGHT);
    state.after_layout()
}

#[test]
fn new_pane_starts_following() {
    let state = TranscriptViewState::new();
    assert!(state.auto_follow());
    assert!(!state.anchor_pending());
}

#[test]
fn first_frame_of_long_history_shows_trailing_window_at_bottom() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 100);

    let adjustment = run_frame(&mut state, &history);

    assert_eq!(adjustment, ScrollAdjustment::Followed);
    assert_eq!(state.window().range(history.len()), 60..100);
    assert_eq!(state.metrics().top(), state.metrics().max_top());
}

#[test]
fn short_history_is_fully_materialized() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 30);

    run_frame(&mut state, &history);

    assert_eq!(state.window().range(history.len()), 0..30);
    let slots = state.visible_slots(history.len());
    assert_eq!(slots.first().map(|s| s.history_index), Some(0));
}

#[test]
fn growth_restores_visual_position() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 100);
    run_frame(&mut state, &history);

    // Read scrollback: move away from the bottom, toward the top.
    state.scroll_by(-(state.metrics().top() as isize));
    state.set_auto_follow(false);

    let top_before = state.metrics().top();
    let height_before = state.metrics().content_height();
    assert!(state.begin_growth());

    state.sync_history(&history);
    state.relayout(&history, WIDTH, HEIGHT);
    let adjustment = state.after_layout();

    assert_eq!(adjustment, ScrollAdjustment::Restored);
    let grown = state.metrics().content_height() - height_before;
    assert!(grown > 0, "twenty older messages must add height");
    assert_eq!(state.metrics().top(), top_before + grown);
    assert_eq!(state.window().range(history.len()), 40..100);
}

#[test]
fn growth_is_refused_while_anchor_pending() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 100);
    run_frame(&mut state, &history);

    assert!(state.begin_growth());
    assert!(
        !state.begin_growth(),
        "second request before the layout pass must be refused"
    );
    assert_eq!(state.window().range(history.len()), 40..100);
}

#[test]
fn growth_is_refused_at_the_front() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 30);
    run_frame(&mut state, &history);

    assert!(!state.begin_growth());
    assert!(!state.anchor_pending());
}

#[test]
fn streaming_reply_keeps_following() {
    let mut state = TranscriptViewState::new();
    let mut history = make_history("c1", 10);
    history
        .push(MessageRecord::new_streaming(
            MessageId::new("reply").expect("valid id"),
        ))
        .expect("unique id");
    run_frame(&mut state, &history);

    for _ in 0..20 {
        history.append_stream_chunk("streamed words arriving one chunk at a time ");
        let adjustment = run_frame(&mut state, &history);
        assert_eq!(adjustment, ScrollAdjustment::Followed);
        assert_eq!(state.metrics().top(), state.metrics().max_top());
    }
}

#[test]
fn streaming_does_not_drag_a_reader_down() {
    let mut state = TranscriptViewState::new();
    let mut history = make_history("c1", 40);
    history
        .push(MessageRecord::new_streaming(
            MessageId::new("reply").expect("valid id"),
        ))
        .expect("unique id");
    run_frame(&mut state, &history);

    // Reader scrolled well away from the bottom.
    state.scroll_by(-200);
    state.set_auto_follow(false);
    let reading_at = state.metrics().top();

    history.append_stream_chunk(&"more words ".repeat(30));
    let adjustment = run_frame(&mut state, &history);

    assert_eq!(adjustment, ScrollAdjustment::None);
    assert_eq!(state.metrics().top(), reading_at);
}

#[test]
fn jump_to_bottom_reengages_follow() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 50);
    run_frame(&mut state, &history);

    state.scroll_by(-300);
    state.set_auto_follow(false);

    state.jump_to_bottom();

    assert!(state.auto_follow());
    let first = state.metrics().top();
    state.jump_to_bottom();
    assert_eq!(state.metrics().top(), first, "jump is idempotent");
}

#[test]
fn conversation_switch_resets_window_and_follow() {
    let mut state = TranscriptViewState::new();
    let first = make_history("c1", 100);
    run_frame(&mut state, &first);
    assert!(state.begin_growth());
    state.set_auto_follow(false);

    let second = make_history("c2", 80);
    let adjustment = run_frame(&mut state, &second);

    assert_eq!(
        state.window().range(second.len()),
        80 - INITIAL_RENDER_COUNT..80
    );
    assert!(state.auto_follow());
    assert_eq!(
        adjustment,
        ScrollAdjustment::Followed,
        "the stale anchor must not suppress the post-switch follow"
    );
}

#[test]
fn switch_between_same_length_conversations_remeasures() {
    let mut state = TranscriptViewState::new();
    let first = make_history("c1", 10);
    run_frame(&mut state, &first);
    let height_first = state.metrics().content_height();

    // Same record count, much longer texts.
    let mut second = ConversationHistory::new(ConversationId::new("c2").expect("valid id"));
    for i in 0..10 {
        second
            .push(MessageRecord::new(
                MessageId::new(format!("n{i}")).expect("valid id"),
                Role::User,
                "a considerably longer message body ".repeat(8),
                Vec::new(),
            ))
            .expect("unique id");
    }
    run_frame(&mut state, &second);

    assert!(
        state.metrics().content_height() > height_first,
        "heights must be re-measured on switch"
    );
}

#[test]
fn chrome_padding_flows_into_content_height() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 5);
    run_frame(&mut state, &history);
    let bare = state.metrics().content_height();

    state.chrome_mut().observe_header(2);
    state.chrome_mut().observe_composer(5);
    run_frame(&mut state, &history);

    assert_eq!(state.metrics().content_height(), bare + 7);
}

#[test]
fn visible_slots_tile_the_viewport() {
    let mut state = TranscriptViewState::new();
    let history = make_history("c1", 100);
    run_frame(&mut state, &history);

    let slots = state.visible_slots(history.len());
    assert!(!slots.is_empty());

    // Slots are contiguous: each starts where the previous ended.
    for pair in slots.windows(2) {
        assert_eq!(pair[0].top_row + pair[0].height as isize, pair[1].top_row);
    }

    // The first slot covers the viewport top, the last reaches past the
    // bottom padding or the viewport edge.
    assert!(slots[0].top_row <= 0);
    let last = slots[slots.len() - 1];
    let viewport = state.metrics().viewport_height() as isize;
    let bottom_padding = state.chrome().padding_bottom() as isize;
    assert!(last.top_row + last.height as isize >= viewport - bottom_padding);

    // Indices are consecutive history positions within the window.
    for pair in slots.windows(2) {
        assert_eq!(pair[0].history_index + 1, pair[1].history_index);
    }
    assert!(slots[0].history_index >= state.window().visible_start());
}

#[test]
fn lazy_threshold_boundary_between_full_and_windowed() {
    let mut state = TranscriptViewState::new();

    let at_threshold = make_history("c1", LAZY_THRESHOLD);
    run_frame(&mut state, &at_threshold);
    assert_eq!(
        state.window().range(at_threshold.len()),
        0..LAZY_THRESHOLD
    );

    let above = make_history("c1", LAZY_THRESHOLD + 1);
    run_frame(&mut state, &above);
    assert_eq!(
        state.window().range(above.len()).len(),
        INITIAL_RENDER_COUNT
    );
}
