//! JSONL transcript parser.
//!
//! Pure parsing functions converting transcript lines into validated
//! `MessageRecord`s. A malformed line becomes a `ParseError` value; the
//! rest of the transcript still loads.

use crate::model::{
    Attachment, ConversationHistory, ConversationId, MessageId, MessageRecord, Role,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Role string constants
const ROLE_USER: &str = "user";
const ROLE_ASSISTANT: &str = "assistant";

/// Conversation id used when a transcript path yields no usable stem.
const FALLBACK_CONVERSATION_ID: &str = "conversation";

/// Error describing one unusable transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not valid JSON.
    #[error("Line {line}: invalid JSON: {reason}")]
    InvalidJson {
        /// 1-based line number in the transcript.
        line: usize,
        /// Parser diagnostic.
        reason: String,
    },

    /// The line is valid JSON but not a valid record.
    #[error("Line {line}: invalid record: {reason}")]
    InvalidRecord {
        /// 1-based line number in the transcript.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The line repeats an id seen earlier in the transcript.
    #[error("Line {line}: duplicate message id {id}")]
    DuplicateId {
        /// 1-based line number in the transcript.
        line: usize,
        /// The repeated id.
        id: String,
    },
}

/// Error loading a transcript file.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The file could not be read.
    #[error("Failed to read transcript at {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Raw JSON structure for deserializing transcript lines.
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    role: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attachments: Vec<RawAttachment>,
}

/// Raw JSON structure for an attachment entry.
#[derive(Debug, Deserialize)]
struct RawAttachment {
    name: String,
    #[serde(default)]
    url: Option<String>,
}

/// Parse a single transcript line into a record.
pub fn parse_record(line: &str, line_number: usize) -> Result<MessageRecord, ParseError> {
    let raw: RawRecord = serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        reason: e.to_string(),
    })?;

    let id = MessageId::new(raw.id).map_err(|e| ParseError::InvalidRecord {
        line: line_number,
        reason: e.to_string(),
    })?;

    let role = match raw.role.as_str() {
        ROLE_USER => Role::User,
        ROLE_ASSISTANT => Role::Assistant,
        other => {
            return Err(ParseError::InvalidRecord {
                line: line_number,
                reason: format!("unknown role {other:?}"),
            })
        }
    };

    let attachments = raw
        .attachments
        .into_iter()
        .map(|a| match a.url {
            Some(url) => Attachment::with_url(a.name, url),
            None => Attachment::new(a.name),
        })
        .collect();

    Ok(MessageRecord::new(id, role, raw.text, attachments))
}

/// Process transcript lines into a history.
///
/// Pure: blank lines are skipped, malformed lines are collected as
/// errors, and duplicates are rejected without aborting the load.
pub fn process_lines<I, S>(
    lines: I,
    conversation: ConversationId,
) -> (ConversationHistory, Vec<ParseError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut history = ConversationHistory::new(conversation);
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line, line_number) {
            Ok(record) => {
                if let Err(duplicate) = history.push(record) {
                    errors.push(ParseError::DuplicateId {
                        line: line_number,
                        id: duplicate.0.as_str().to_string(),
                    });
                }
            }
            Err(err) => errors.push(err),
        }
    }

    (history, errors)
}

/// Load a transcript file. The conversation id is derived from the file
/// stem.
pub fn load_transcript(path: &Path) -> Result<(ConversationHistory, Vec<ParseError>), TranscriptError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TranscriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let conversation = conversation_id_for(path);
    Ok(process_lines(contents.lines(), conversation))
}

/// Conversation id for a transcript path: the file stem, or a fallback
/// when the stem is empty.
pub fn conversation_id_for(path: &Path) -> ConversationId {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| ConversationId::new(stem).ok())
        .unwrap_or_else(|| {
            ConversationId::new(FALLBACK_CONVERSATION_ID).expect("fallback id is non-empty")
        })
}
