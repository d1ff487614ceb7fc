//! Tests for root application state transitions.

use super::*;
use crate::model::{ConversationId, MessageId, Role};

fn make_state() -> AppState {
    let history = ConversationHistory::new(ConversationId::new("c1").expect("valid id"));
    AppState::new(history, "Conversation", LinkState::Online)
}

fn user_record(id: &str) -> MessageRecord {
    MessageRecord::new(
        MessageId::new(id).expect("valid id"),
        Role::User,
        "hello",
        Vec::new(),
    )
}

#[test]
fn new_state_is_quiet() {
    let state = make_state();
    assert!(!state.ai_replying);
    assert!(!state.should_quit);
    assert!(!state.connectivity.is_offline());
    assert!(state.active_notice().is_none());
    assert!(state.history().is_empty());
}

#[test]
fn push_record_appends_to_history() {
    let mut state = make_state();
    state.push_record(user_record("m1")).unwrap();
    assert_eq!(state.history().len(), 1);
}

#[test]
fn stream_chunks_reach_the_trailing_reply() {
    let mut state = make_state();
    state.push_record(user_record("m1")).unwrap();
    state
        .push_record(MessageRecord::new_streaming(
            MessageId::new("reply").expect("valid id"),
        ))
        .unwrap();
    state.ai_replying = true;

    assert!(state.apply_stream_chunk("partial "));
    assert!(state.apply_stream_chunk("answer"));
    assert_eq!(state.history().records()[1].text(), "partial answer");
}

#[test]
fn finish_reply_settles_and_clears_the_flag() {
    let mut state = make_state();
    state
        .push_record(MessageRecord::new_streaming(
            MessageId::new("reply").expect("valid id"),
        ))
        .unwrap();
    state.ai_replying = true;

    state.finish_reply();

    assert!(!state.ai_replying);
    assert!(!state.history().records()[0].is_loading());
}

#[test]
fn connectivity_transition_surfaces_a_notice() {
    let mut state = make_state();

    state.apply_connectivity(ConnectivityEvent::Offline);

    assert!(state.connectivity.is_offline());
    let notice = state.active_notice().expect("notice after transition");
    assert_eq!(notice.text, "connection lost");
}

#[test]
fn repeated_observation_does_not_refresh_the_notice() {
    let mut state = make_state();
    state.apply_connectivity(ConnectivityEvent::Offline);
    for _ in 0..5 {
        state.tick();
    }
    state.apply_connectivity(ConnectivityEvent::Offline);

    // Still the same decaying notice; a few more ticks expire it.
    for _ in 0..25 {
        state.tick();
    }
    assert!(state.active_notice().is_none());
}

#[test]
fn notice_expires_after_its_ttl() {
    let mut state = make_state();
    state.apply_connectivity(ConnectivityEvent::Offline);

    for _ in 0..29 {
        state.tick();
    }
    assert!(state.active_notice().is_some());
    state.tick();
    assert!(state.active_notice().is_none());
}

#[test]
fn spinner_advances_only_while_replying() {
    let mut state = make_state();
    state.tick();
    assert_eq!(state.spinner_frame, 0);

    state.ai_replying = true;
    state.tick();
    state.tick();
    assert_eq!(state.spinner_frame, 2);
}

#[test]
fn set_history_swaps_the_conversation() {
    let mut state = make_state();
    state.push_record(user_record("m1")).unwrap();

    let other = ConversationHistory::new(ConversationId::new("c2").expect("valid id"));
    state.set_history(other);

    assert_eq!(state.history().conversation_id().as_str(), "c2");
    assert!(state.history().is_empty());
}
