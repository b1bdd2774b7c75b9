//! Settings Models
//!
//! Memory bridge configuration stored in memory-bridge.json.

use serde::{Deserialize, Serialize};

/// Verbs that mark an assistant bullet line as a decision
pub const DEFAULT_DECISION_VERBS: &[&str] = &[
    "Created",
    "Updated",
    "Fixed",
    "Added",
    "Removed",
    "Changed",
    "Implemented",
    "Configured",
];

/// Memory bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Sessions kept per project (rolling window)
    pub window_size: usize,
    /// Sessions returned when loading context
    pub query_limit: usize,
    /// Trailing assistant messages scanned for decisions
    pub assistant_lookback: usize,
    /// Case-insensitive verbs recognized in decision lines
    pub decision_verbs: Vec<String>,
    /// Characters of the initial request shown per session in injected context
    pub context_request_chars: usize,
    /// Decision lines shown per session in injected context
    pub context_decisions: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            query_limit: 5,
            assistant_lookback: 5,
            decision_verbs: DEFAULT_DECISION_VERBS.iter().map(|v| v.to_string()).collect(),
            context_request_chars: 200,
            context_decisions: 5,
        }
    }
}

impl BridgeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.window_size == 0 {
            return Err("window_size must be at least 1".to_string());
        }
        if self.query_limit == 0 {
            return Err("query_limit must be at least 1".to_string());
        }
        if self.assistant_lookback == 0 {
            return Err("assistant_lookback must be at least 1".to_string());
        }
        if self.decision_verbs.iter().all(|v| v.trim().is_empty()) {
            return Err("decision_verbs must contain at least one verb".to_string());
        }
        Ok(())
    }
}
