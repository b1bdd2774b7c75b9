//! Session Summary Models
//!
//! The distilled digest of one session and its persisted form.

use serde::{Deserialize, Serialize};

/// Maximum characters kept from the first user message
pub const MAX_INITIAL_REQUEST_CHARS: usize = 500;

/// Maximum decision lines kept per session
pub const MAX_DECISIONS: usize = 10;

/// Bounded digest produced by the extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub initial_request: String,
    pub decisions: Vec<String>,
}

impl SessionSummary {
    /// Build a summary, truncating both fields to their bounds.
    pub fn new(initial_request: &str, decisions: Vec<String>) -> Self {
        Self {
            initial_request: truncate_chars(initial_request, MAX_INITIAL_REQUEST_CHARS),
            decisions,
        }
        .clamped()
    }

    /// Enforce the stored-record bounds on an arbitrary summary.
    pub fn clamped(mut self) -> Self {
        if self.initial_request.chars().count() > MAX_INITIAL_REQUEST_CHARS {
            self.initial_request = truncate_chars(&self.initial_request, MAX_INITIAL_REQUEST_CHARS);
        }
        self.decisions.truncate(MAX_DECISIONS);
        self
    }
}

/// A persisted summary as returned by retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: i64,
    pub session_id: String,
    pub project_path: String,
    #[serde(flatten)]
    pub summary: SessionSummary,
    pub message_count: i64,
    pub created_at: String,
}

/// First `max` characters of `text` (char boundaries, not bytes).
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
