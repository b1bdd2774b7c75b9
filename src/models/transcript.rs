//! Transcript Models
//!
//! One line of a JSONL transcript as written by the host. Records come either
//! flat (`{"role": ..., "content": ...}`) or wrapped in a `message` envelope.

use serde::{Deserialize, Serialize};

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    #[default]
    #[serde(other)]
    Other,
}

/// Message body: plain text or anything structured (content blocks, tool calls)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(serde_json::Value),
}

impl MessageContent {
    /// Plain text body, or `""` for structured content.
    pub fn as_text(&self) -> &str {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Structured(_) => "",
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

/// A single role-tagged transcript message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Message {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: MessageContent,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }
}

/// Raw transcript line before normalization
#[derive(Debug, Clone, Deserialize)]
struct TranscriptRecord {
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    content: Option<MessageContent>,
    #[serde(default)]
    message: Option<Message>,
}

impl TranscriptRecord {
    fn into_message(self) -> Message {
        match (self.role, self.message) {
            (None, Some(message)) => message,
            (role, _) => Message {
                role: role.unwrap_or_default(),
                content: self.content.unwrap_or_default(),
            },
        }
    }
}

/// Parse one transcript line. Returns `None` when the line is not a JSON object.
pub fn parse_line(line: &str) -> Option<Message> {
    serde_json::from_str::<TranscriptRecord>(line)
        .ok()
        .map(TranscriptRecord::into_message)
}
