//! Application state and transitions.
//!
//! AppState is the root state type containing the history reference, the
//! transcript view-state, connectivity, and the composer props. All
//! transitions are pure; the shell only routes events into them.

use crate::model::{ConversationHistory, DuplicateMessageId, MessageRecord};
use crate::state::connectivity::{Connectivity, ConnectivityEvent, LinkState, Notice};
use crate::view_state::anchor::ScrollAdjustment;
use crate::view_state::transcript::TranscriptViewState;

/// Ticks a one-shot notice stays on screen.
const NOTICE_TICKS: u8 = 30;

/// Event forwarded verbatim to the host; the pane never interprets these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// The user submitted the composer content.
    Send,
    /// The composer text changed.
    Change(String),
    /// The user asked to interrupt the streaming reply.
    StopGenerating,
    /// The user started voice recording.
    StartRecording,
    /// The user stopped voice recording.
    StopRecording,
    /// The staged file list changed.
    FilesChanged(Vec<String>),
}

/// Composer props mirrored for display; owned by the host, echoed here.
#[derive(Debug, Clone, Default)]
pub struct ComposerState {
    /// Current input text.
    pub value: String,
    /// Whether voice recording is active.
    pub recording: bool,
    /// Staged files awaiting send.
    pub files: Vec<String>,
}

/// A notice currently on screen, with its remaining lifetime.
#[derive(Debug, Clone, Copy)]
struct ActiveNotice {
    notice: Notice,
    remaining_ticks: u8,
}

/// Root application state. Pure data, no side effects.
#[derive(Debug)]
pub struct AppState {
    /// The conversation being displayed.
    history: ConversationHistory,
    /// Scroll-management core.
    pub transcript: TranscriptViewState,
    /// Connectivity indicator.
    pub connectivity: Connectivity,
    /// Composer display state.
    pub composer: ComposerState,
    /// Whether an assistant reply is streaming; gates the stop affordance.
    pub ai_replying: bool,
    /// Pane title shown in the header.
    pub title: String,
    /// Set when the shell should tear down.
    pub should_quit: bool,
    /// Spinner animation frame, advanced on ticks while replying.
    pub spinner_frame: usize,
    /// One-shot notice currently displayed, if any.
    active_notice: Option<ActiveNotice>,
}

impl AppState {
    /// Create application state around a history.
    pub fn new(history: ConversationHistory, title: impl Into<String>, link: LinkState) -> Self {
        Self {
            history,
            transcript: TranscriptViewState::new(),
            connectivity: Connectivity::new(link),
            composer: ComposerState::default(),
            ai_replying: false,
            title: title.into(),
            should_quit: false,
            spinner_frame: 0,
            active_notice: None,
        }
    }

    /// The displayed conversation.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Replace the displayed conversation (conversation switch).
    /// The transcript picks up the identity change on its next sync.
    pub fn set_history(&mut self, history: ConversationHistory) {
        self.history = history;
    }

    /// Append a record to the history.
    pub fn push_record(&mut self, record: MessageRecord) -> Result<(), DuplicateMessageId> {
        self.history.push(record)
    }

    /// Route a streamed chunk into the trailing reply.
    pub fn apply_stream_chunk(&mut self, chunk: &str) -> bool {
        self.history.append_stream_chunk(chunk)
    }

    /// Settle the streaming reply and drop the stop affordance.
    pub fn finish_reply(&mut self) {
        self.history.finish_streaming();
        self.ai_replying = false;
    }

    /// Apply a connectivity observation; a transition surfaces a notice.
    pub fn apply_connectivity(&mut self, event: ConnectivityEvent) {
        if let Some(notice) = self.connectivity.apply(event) {
            self.active_notice = Some(ActiveNotice {
                notice,
                remaining_ticks: NOTICE_TICKS,
            });
        }
    }

    /// The notice currently on screen, if any.
    pub fn active_notice(&self) -> Option<&Notice> {
        self.active_notice.as_ref().map(|active| &active.notice)
    }

    /// Run the layout phase of one frame: record chrome measurements,
    /// reconcile the window, recompute geometry, then apply the deferred
    /// scroll adjustment against the committed layout.
    pub fn layout_frame(
        &mut self,
        width: u16,
        height: u16,
        header_rows: u16,
        composer_rows: u16,
    ) -> ScrollAdjustment {
        self.transcript.chrome_mut().observe_header(header_rows);
        self.transcript.chrome_mut().observe_composer(composer_rows);
        self.transcript.sync_history(&self.history);
        self.transcript.relayout(&self.history, width, height);
        self.transcript.after_layout()
    }

    /// Advance per-tick animation and notice decay.
    pub fn tick(&mut self) {
        if self.ai_replying {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        if let Some(active) = &mut self.active_notice {
            active.remaining_ticks = active.remaining_ticks.saturating_sub(1);
            if active.remaining_ticks == 0 {
                self.active_notice = None;
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
