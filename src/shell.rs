//! Impure shell: terminal lifecycle and the event loop.
//!
//! Each loop iteration drains the event channel, then runs the frame
//! pipeline: measure chrome → sync window → relayout → deferred scroll
//! adjustment → draw. Outbound events are forwarded to the host; this
//! demo shell stands in for the host by logging them and answering a
//! send with a simulated streaming reply.

use crate::config::ResolvedConfig;
use crate::events::{self, AppEvent, Subscription};
use crate::model::{Attachment, ConversationHistory, MessageId, MessageRecord, Role};
use crate::state::{handle_scroll_sample, AppState, LinkState, OutboundEvent};
use crate::view::{self, composer, header, ColorConfig, PaneStyles};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Terminal I/O failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Canned reply streamed by the demo host after a send.
const DEMO_REPLY: &str = "I looked at the transcript you loaded. Scroll up to pull older \
history in; the view keeps its place as the document grows above you. Scroll back near the \
bottom and new messages will follow automatically again.";

/// Delay between streamed demo chunks.
const DEMO_CHUNK_DELAY: Duration = Duration::from_millis(120);

/// Run the pane until the user quits.
pub fn run(
    config: &ResolvedConfig,
    history: ConversationHistory,
    no_color: bool,
) -> Result<(), ShellError> {
    let styles = PaneStyles::with_color_config(ColorConfig::from_env_and_args(no_color));
    let initial_link = if config.offline {
        LinkState::Online
    } else {
        events::probe_link_state(&config.probe_addr)
    };
    tracing::info!(?initial_link, messages = history.len(), "starting pane");

    let (tx, rx) = mpsc::channel();
    let input_subscription = events::spawn_input_pump(tx.clone());
    let connectivity_subscription = if config.offline {
        None
    } else {
        Some(events::spawn_connectivity_watcher(
            tx.clone(),
            config.probe_addr.clone(),
            Duration::from_secs(config.probe_interval_secs),
            initial_link,
        ))
    };

    let mut terminal = ratatui::init();
    let _ = execute!(std::io::stdout(), EnableMouseCapture);

    let mut event_loop = EventLoop {
        state: AppState::new(history, config.title.clone(), initial_link),
        rx,
        tx,
        styles,
        tick: Duration::from_millis(config.tick_rate_ms),
        mouse_step: config.mouse_scroll_step as isize,
        reply_subscription: None,
        local_seq: 0,
    };
    let result = event_loop.run(&mut terminal);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    // Observer teardown is explicit: nothing here relies on the host
    // cleaning up after us.
    drop(event_loop);
    if let Some(subscription) = connectivity_subscription {
        subscription.cancel();
    }
    input_subscription.cancel();

    result
}

/// The event loop and everything it owns.
struct EventLoop {
    state: AppState,
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
    styles: PaneStyles,
    tick: Duration,
    mouse_step: isize,
    reply_subscription: Option<Subscription>,
    local_seq: u64,
}

impl EventLoop {
    fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<(), ShellError> {
        loop {
            match self.rx.recv_timeout(self.tick) {
                Ok(event) => {
                    self.handle_event(event);
                    // Coalesce whatever else is queued before paying for
                    // a frame.
                    while let Ok(event) = self.rx.try_recv() {
                        self.handle_event(event);
                    }
                }
                Err(RecvTimeoutError::Timeout) => self.state.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if self.state.should_quit {
                break;
            }
            self.draw_frame(terminal)?;
        }
        Ok(())
    }

    fn draw_frame(&mut self, terminal: &mut DefaultTerminal) -> Result<(), ShellError> {
        let size = terminal.size()?;
        let header_rows = header::measure(&self.state.title, self.state.ai_replying, size.width);
        let composer_rows = composer::measure(&self.state.composer, size.width);

        let adjustment =
            self.state
                .layout_frame(size.width, size.height, header_rows, composer_rows);
        tracing::trace!(?adjustment, top = self.state.transcript.metrics().top(), "frame");

        terminal.draw(|frame| view::render(frame, &self.state, &self.styles))?;
        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
            }
            // Resizes are picked up by the next layout pass.
            AppEvent::Input(Event::Mouse(mouse)) => self.handle_mouse(mouse),
            AppEvent::Input(_) => {}
            AppEvent::StreamChunk(chunk) => {
                self.state.apply_stream_chunk(&chunk);
            }
            AppEvent::ReplyDone => {
                self.state.finish_reply();
                self.reply_subscription = None;
            }
            AppEvent::Connectivity(event) => self.state.apply_connectivity(event),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.state.should_quit = true;
            }
            (KeyCode::Esc, _) => self.stop_generating(),
            (KeyCode::Enter, _) => self.submit_input(),
            (KeyCode::Backspace, _) => {
                self.state.composer.value.pop();
                self.emit(OutboundEvent::Change(self.state.composer.value.clone()));
            }
            (KeyCode::PageUp, _) => {
                let page = self.state.transcript.metrics().viewport_height() as isize;
                self.scroll(-(page - 1).max(1));
            }
            (KeyCode::PageDown, _) => {
                let page = self.state.transcript.metrics().viewport_height() as isize;
                self.scroll((page - 1).max(1));
            }
            (KeyCode::Up, _) => self.scroll(-1),
            (KeyCode::Down, _) => self.scroll(1),
            (KeyCode::End, _) => self.state.transcript.jump_to_bottom(),
            (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.state.composer.recording = !self.state.composer.recording;
                self.emit(if self.state.composer.recording {
                    OutboundEvent::StartRecording
                } else {
                    OutboundEvent::StopRecording
                });
            }
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                self.state.composer.value.push(c);
                self.emit(OutboundEvent::Change(self.state.composer.value.clone()));
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll(-self.mouse_step),
            MouseEventKind::ScrollDown => self.scroll(self.mouse_step),
            _ => {}
        }
    }

    /// Apply user scroll input, then run the monitor against the
    /// resulting geometry.
    fn scroll(&mut self, delta: isize) {
        self.state.transcript.scroll_by(delta);
        let len = self.state.history().len();
        let sample = handle_scroll_sample(&mut self.state.transcript, len);
        if sample.growth_requested {
            tracing::debug!(
                cursor = self.state.transcript.window().visible_start(),
                "older history requested"
            );
        }
    }

    fn stop_generating(&mut self) {
        if !self.state.ai_replying {
            return;
        }
        if let Some(subscription) = self.reply_subscription.take() {
            subscription.cancel();
        }
        self.emit(OutboundEvent::StopGenerating);
        self.state.finish_reply();
    }

    fn submit_input(&mut self) {
        if self.state.ai_replying {
            return;
        }
        let text = self.state.composer.value.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.emit(OutboundEvent::Send);

        let attachments: Vec<Attachment> = self
            .state
            .composer
            .files
            .drain(..)
            .map(Attachment::new)
            .collect();
        if !attachments.is_empty() {
            self.emit(OutboundEvent::FilesChanged(Vec::new()));
        }

        let user_record = MessageRecord::new(self.next_local_id(), Role::User, text, attachments);
        if let Err(err) = self.state.push_record(user_record) {
            tracing::warn!("dropping message: {err}");
            return;
        }

        let reply_record = MessageRecord::new_streaming(self.next_local_id());
        if let Err(err) = self.state.push_record(reply_record) {
            tracing::warn!("dropping reply slot: {err}");
            return;
        }
        self.state.ai_replying = true;

        self.state.composer.value.clear();
        self.emit(OutboundEvent::Change(String::new()));

        self.reply_subscription = Some(spawn_demo_reply(self.tx.clone()));
    }

    fn next_local_id(&mut self) -> MessageId {
        self.local_seq += 1;
        MessageId::new(format!("local-{}", self.local_seq)).expect("local ids are non-empty")
    }

    /// Forward an event to the host verbatim. The demo shell is its own
    /// host and records them in the log.
    fn emit(&self, event: OutboundEvent) {
        tracing::info!(?event, "outbound event");
    }
}

/// Stream the canned demo reply, one word at a time.
fn spawn_demo_reply(tx: Sender<AppEvent>) -> Subscription {
    Subscription::spawn("demo-reply", move |stop| {
        for chunk in DEMO_REPLY.split_inclusive(' ') {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            if tx.send(AppEvent::StreamChunk(chunk.to_string())).is_err() {
                return;
            }
            std::thread::sleep(DEMO_CHUNK_DELAY);
        }
        if !stop.load(Ordering::Relaxed) {
            let _ = tx.send(AppEvent::ReplyDone);
        }
    })
}
