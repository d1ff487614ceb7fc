//! Message types for chat transcripts.
//!
//! A `MessageRecord` is immutable once appended, with two exceptions that
//! exist for streamed assistant replies: `text` may grow via `append_text`
//! and `is_loading` may flip to false via `finish`. Raw field access is
//! never exported.

use crate::model::MessageId;

// ===== Role =====

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Message authored by the user.
    User,
    /// Message authored by the assistant.
    Assistant,
}

// ===== Attachment =====

/// File attached to a message.
///
/// The pane renders attachment rows but never interprets their content;
/// upload and download are owned by collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Display name of the attachment.
    name: String,
    /// Optional source location, forwarded verbatim.
    url: Option<String>,
}

impl Attachment {
    /// Create an attachment with a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    /// Create an attachment with a display name and source location.
    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    /// Display name of the attachment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source location, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

// ===== MessageRecord =====

/// A single message in the transcript.
///
/// # Mutability
///
/// Records are append-only data except for streaming: an assistant reply
/// is appended with `is_loading = true` and empty text, grows in place via
/// `append_text`, and settles via `finish`. Everything else is fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Unique id, relied on for stable display identity.
    id: MessageId,
    /// Message author.
    role: Role,
    /// Message body. Grows in place while streaming.
    text: String,
    /// Attached files, in the order they were attached.
    attachments: Vec<Attachment>,
    /// Whether the message is still being streamed.
    is_loading: bool,
}

impl MessageRecord {
    /// Create a settled (non-streaming) message.
    pub fn new(
        id: MessageId,
        role: Role,
        text: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            attachments,
            is_loading: false,
        }
    }

    /// Create an assistant message that will stream its text in.
    pub fn new_streaming(id: MessageId) -> Self {
        Self {
            id,
            role: Role::Assistant,
            text: String::new(),
            attachments: Vec::new(),
            is_loading: true,
        }
    }

    /// Unique message id.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Message author.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Message body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attached files.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Whether the message is still streaming.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Append a streamed chunk to the message body.
    pub fn append_text(&mut self, chunk: &str) {
        debug_assert!(self.is_loading, "append_text on a settled message");
        self.text.push_str(chunk);
    }

    /// Mark the message as fully streamed.
    pub fn finish(&mut self) {
        self.is_loading = false;
    }
}
