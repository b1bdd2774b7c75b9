//! Context Formatting
//!
//! Renders retrieved sessions as the markdown block injected at session start.

use chrono::{DateTime, NaiveDate};

use crate::models::session::{truncate_chars, StoredSession};
use crate::models::settings::BridgeConfig;

/// Limits applied when rendering each session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    pub request_chars: usize,
    pub decisions_per_session: usize,
}

impl From<&BridgeConfig> for ContextOptions {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            request_chars: config.context_request_chars,
            decisions_per_session: config.context_decisions,
        }
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self::from(&BridgeConfig::default())
    }
}

/// Format sessions (newest first) as markdown. Empty input renders as `""`.
pub fn format_context(sessions: &[StoredSession], options: &ContextOptions) -> String {
    if sessions.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        "## Previous Session Context".to_string(),
        String::new(),
        format!(
            "*Memory from last {} session(s) in this project:*",
            sessions.len()
        ),
        String::new(),
    ];

    for (i, session) in sessions.iter().enumerate() {
        lines.push(format!("### Session {} ({})", i + 1, display_date(&session.created_at)));

        let request = &session.summary.initial_request;
        if !request.is_empty() {
            lines.push(format!(
                "**Context**: {}...",
                truncate_chars(request, options.request_chars)
            ));
        }

        if !session.summary.decisions.is_empty() {
            lines.push("**Key actions**:".to_string());
            lines.extend(
                session
                    .summary
                    .decisions
                    .iter()
                    .take(options.decisions_per_session)
                    .cloned(),
            );
        }

        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.join("\n")
}

/// Calendar date of a stored timestamp, or the raw value if it does not parse
fn display_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|ts| ts.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(created_at.get(..10).unwrap_or(""), "%Y-%m-%d"))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}
