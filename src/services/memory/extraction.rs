//! Session Summary Extraction
//!
//! Heuristic distillation of a JSONL transcript into a bounded
//! [`SessionSummary`]:
//! - `initial_request`: first user message, truncated to 500 characters
//! - `decisions`: bullet lines in the last few assistant messages that start
//!   with an action verb ("- Fixed ...", "* Added ..."), capped at 10
//!
//! Extraction never fails. Missing or empty transcripts yield `None` and
//! unparseable lines are skipped and counted.

use std::path::Path;

use regex::Regex;

use crate::models::session::{SessionSummary, MAX_DECISIONS};
use crate::models::settings::BridgeConfig;
use crate::models::transcript::{parse_line, Message, Role};
use crate::utils::error::{AppError, AppResult};

/// Matches decision lines against a configurable verb list
#[derive(Debug, Clone)]
pub struct DecisionMatcher {
    pattern: Regex,
}

impl DecisionMatcher {
    /// Build a matcher for `verbs` (case-insensitive, matched as literals).
    pub fn new<S: AsRef<str>>(verbs: &[S]) -> AppResult<Self> {
        let alternatives: Vec<String> = verbs
            .iter()
            .map(|v| v.as_ref().trim())
            .filter(|v| !v.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Err(AppError::validation("decision verb list is empty"));
        }

        let pattern = Regex::new(&format!(r"(?i)^\s*[-*]\s+(?:{})", alternatives.join("|")))
            .map_err(|e| AppError::validation(format!("Invalid decision pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Whether a single line reads as a decision
    pub fn is_decision(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Collect decision lines from `texts` in order, trimmed, keeping at most `cap`.
    pub fn collect<'a>(&self, texts: impl IntoIterator<Item = &'a str>, cap: usize) -> Vec<String> {
        texts
            .into_iter()
            .flat_map(str::lines)
            .filter(|line| self.is_decision(line))
            .map(|line| line.trim().to_string())
            .take(cap)
            .collect()
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub summary: SessionSummary,
    /// Messages parsed from the transcript
    pub message_count: usize,
    /// Non-blank lines that were not valid transcript records
    pub skipped_lines: usize,
}

/// Transcript-to-summary extractor
#[derive(Debug, Clone)]
pub struct SessionExtractor {
    matcher: DecisionMatcher,
    assistant_lookback: usize,
}

impl SessionExtractor {
    pub fn new(config: &BridgeConfig) -> AppResult<Self> {
        Ok(Self {
            matcher: DecisionMatcher::new(&config.decision_verbs)?,
            assistant_lookback: config.assistant_lookback,
        })
    }

    /// Read and extract a transcript file. Unreadable or missing files yield `None`.
    ///
    /// Lines are decoded one at a time; a line that is not UTF-8 is skipped.
    pub fn extract_from_path(&self, path: &Path) -> Option<Extraction> {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[MemoryBridge] Transcript not found: {}", path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    "[MemoryBridge] Could not read transcript {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };
        self.extract_bytes(&content)
    }

    /// Extract from raw JSONL bytes, decoding each line independently
    pub fn extract_bytes(&self, content: &[u8]) -> Option<Extraction> {
        self.extract_decoded(
            content
                .split(|b| *b == b'\n')
                .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
                .map(|line| std::str::from_utf8(line).ok()),
        )
    }

    /// Extract from raw JSONL text
    pub fn extract_str(&self, content: &str) -> Option<Extraction> {
        self.extract_lines(content.lines())
    }

    /// Extract from transcript lines. `None` when there is no non-blank line.
    pub fn extract_lines<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Option<Extraction> {
        self.extract_decoded(
            lines
                .into_iter()
                .filter(|l| !l.trim().is_empty())
                .map(Some),
        )
    }

    /// Non-blank lines, `None` where a line could not be decoded.
    fn extract_decoded<'a>(
        &self,
        lines: impl Iterator<Item = Option<&'a str>>,
    ) -> Option<Extraction> {
        let mut non_blank = 0usize;
        let mut skipped_lines = 0usize;
        let mut messages = Vec::new();

        for line in lines {
            non_blank += 1;
            match line.and_then(parse_line) {
                Some(message) => messages.push(message),
                None => skipped_lines += 1,
            }
        }

        if non_blank == 0 {
            return None;
        }
        if skipped_lines > 0 {
            tracing::debug!(
                "[MemoryBridge] Skipped {} unparseable transcript line(s)",
                skipped_lines
            );
        }

        Some(Extraction {
            summary: self.summarize(&messages),
            message_count: messages.len(),
            skipped_lines,
        })
    }

    /// Build the summary from already-parsed messages
    pub fn summarize(&self, messages: &[Message]) -> SessionSummary {
        let initial_request = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_text())
            .unwrap_or_default();

        let assistant: Vec<&Message> = messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .collect();
        let start = assistant.len().saturating_sub(self.assistant_lookback);

        let decisions = self.matcher.collect(
            assistant[start..].iter().map(|m| m.content.as_text()),
            MAX_DECISIONS,
        );

        SessionSummary::new(initial_request, decisions)
    }
}
