//! Conversation history: the ordered message sequence the pane displays.

use crate::model::{ConversationId, MessageId, MessageRecord};
use std::collections::HashSet;
use thiserror::Error;

/// Error returned when appending a record whose id is already present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate message id: {0}")]
pub struct DuplicateMessageId(pub MessageId);

/// Append-ordered sequence of messages belonging to one conversation.
///
/// Ordering is append order (chronological). Message ids are unique within
/// a history; `push` enforces this so the display layer can rely on stable
/// identity.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    /// Identity of the conversation these records belong to.
    conversation: ConversationId,
    /// Records in append order.
    records: Vec<MessageRecord>,
    /// Ids seen so far, for O(1) duplicate detection on push.
    seen_ids: HashSet<MessageId>,
}

impl ConversationHistory {
    /// Create an empty history for the given conversation.
    pub fn new(conversation: ConversationId) -> Self {
        Self {
            conversation,
            records: Vec::new(),
            seen_ids: HashSet::new(),
        }
    }

    /// Identity of the conversation.
    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in append order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Append a record, rejecting duplicate ids.
    pub fn push(&mut self, record: MessageRecord) -> Result<(), DuplicateMessageId> {
        if !self.seen_ids.insert(record.id().clone()) {
            return Err(DuplicateMessageId(record.id().clone()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Mutable access to the trailing record if it is still streaming.
    ///
    /// Streaming only ever targets the most recent message; anything
    /// earlier is settled by construction.
    pub fn streaming_tail_mut(&mut self) -> Option<&mut MessageRecord> {
        self.records.last_mut().filter(|r| r.is_loading())
    }

    /// Append a streamed chunk to the trailing reply.
    /// Returns false (and does nothing) when no reply is streaming.
    pub fn append_stream_chunk(&mut self, chunk: &str) -> bool {
        match self.streaming_tail_mut() {
            Some(record) => {
                record.append_text(chunk);
                true
            }
            None => false,
        }
    }

    /// Settle the trailing streaming reply.
    /// Returns false (and does nothing) when no reply is streaming.
    pub fn finish_streaming(&mut self) -> bool {
        match self.streaming_tail_mut() {
            Some(record) => {
                record.finish();
                true
            }
            None => false,
        }
    }
}
