//! Layout and text constants for pane rendering.

/// Spinner frames shown on a streaming reply, advanced per tick.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Label of the floating jump-to-bottom affordance.
pub const JUMP_AFFORDANCE_LABEL: &str = " ↓ latest (End) ";

/// Label of the stop-generating affordance in the header.
pub const STOP_AFFORDANCE_LABEL: &str = "[stop · Esc]";

/// Placeholder shown in an empty composer input.
pub const COMPOSER_PLACEHOLDER: &str = "Type a message…";

/// Hint shown in an empty transcript.
pub const EMPTY_STATE_HINT: &str = "No messages yet. Say something to start.";

/// Sender label for user bubbles.
pub const USER_LABEL: &str = "you";

/// Sender label for assistant bubbles.
pub const ASSISTANT_LABEL: &str = "assistant";
