//! Identifier newtypes with validation.
//!
//! Raw constructors are never exported - use smart constructors only.

use thiserror::Error;

// ===== MessageId =====

/// Unique identifier of a message within a conversation.
///
/// Uniqueness is relied on by the windowed selector for stable display
/// identity; `ConversationHistory` enforces it on append.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

/// Error returned when a message id fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Message id must be non-empty")]
pub struct InvalidMessageId;

impl MessageId {
    /// Create a validated message id. Rejects empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidMessageId> {
        let id = id.into();
        if id.is_empty() {
            Err(InvalidMessageId)
        } else {
            Ok(Self(id))
        }
    }

    /// Get the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== ConversationId =====

/// Identity of a conversation.
///
/// A change of conversation id signals a full window reset to the lazy
/// selector, regardless of how the history contents compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(String);

/// Error returned when a conversation id fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Conversation id must be non-empty")]
pub struct InvalidConversationId;

impl ConversationId {
    /// Create a validated conversation id. Rejects empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidConversationId> {
        let id = id.into();
        if id.is_empty() {
            Err(InvalidConversationId)
        } else {
            Ok(Self(id))
        }
    }

    /// Get the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
