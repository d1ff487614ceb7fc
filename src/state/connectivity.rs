//! Connectivity indicator state machine.
//!
//! Two states driven by the platform's reachability signal. Each
//! transition emits a one-shot notice; while offline the view renders a
//! persistent banner. Purely observational: no retry or reconnection
//! logic lives here, and the transcript stays fully interactive offline.

/// Reachability as last reported by the platform signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// The platform reports connectivity.
    Online,
    /// The platform reports no connectivity.
    Offline,
}

/// A reachability observation delivered by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// Connectivity was observed.
    Online,
    /// Loss of connectivity was observed.
    Offline,
}

/// Severity of a one-shot notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Good news, styled as success.
    Success,
    /// Bad news, styled as warning.
    Warning,
}

/// One-shot user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// Severity, drives styling.
    pub kind: NoticeKind,
    /// Notification text.
    pub text: &'static str,
}

/// Connectivity state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    /// Current link state.
    state: LinkState,
}

impl Connectivity {
    /// Create the machine in the given initial state (the platform's
    /// current reachability at mount time).
    pub fn new(initial: LinkState) -> Self {
        Self { state: initial }
    }

    /// Current link state.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Whether the offline banner should render.
    pub fn is_offline(&self) -> bool {
        self.state == LinkState::Offline
    }

    /// Apply an observation. Emits a notice only on an actual transition;
    /// repeated observations of the same state are absorbed silently,
    /// keeping the machine order-tolerant.
    pub fn apply(&mut self, event: ConnectivityEvent) -> Option<Notice> {
        match (self.state, event) {
            (LinkState::Offline, ConnectivityEvent::Online) => {
                self.state = LinkState::Online;
                Some(Notice {
                    kind: NoticeKind::Success,
                    text: "connection restored",
                })
            }
            (LinkState::Online, ConnectivityEvent::Offline) => {
                self.state = LinkState::Offline;
                Some(Notice {
                    kind: NoticeKind::Warning,
                    text: "connection lost",
                })
            }
            _ => None,
        }
    }
}
