//! Hook Payload Models
//!
//! Request delivered by the host on stdin and the response printed on stdout.

use serde::{Deserialize, Serialize};

/// Hook request from the host. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

impl HookInput {
    /// Parse raw stdin. Blank input yields the default request.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }
}

/// SessionStart response understood by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

impl HookOutput {
    pub fn session_start(additional_context: String) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "SessionStart".to_string(),
                additional_context,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_input() {
        let input = HookInput::parse(
            r#"{"session_id":"abc","transcript_path":"/tmp/t.jsonl","cwd":"/work","hook_event_name":"PreCompact","trigger":"auto"}"#,
        )
        .unwrap();
        assert_eq!(input.session_id.as_deref(), Some("abc"));
        assert_eq!(input.transcript_path.as_deref(), Some("/tmp/t.jsonl"));
        assert_eq!(input.cwd.as_deref(), Some("/work"));
    }

    #[test]
    fn test_parse_blank_input() {
        assert_eq!(HookInput::parse("  \n").unwrap(), HookInput::default());
    }

    #[test]
    fn test_parse_malformed_input() {
        assert!(HookInput::parse("{not json").is_err());
    }

    #[test]
    fn test_session_start_output_shape() {
        let output = HookOutput::session_start("ctx".into());
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["hookSpecificOutput"]["hookEventName"], "SessionStart");
        assert_eq!(json["hookSpecificOutput"]["additionalContext"], "ctx");
    }
}
