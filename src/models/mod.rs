//! Data Models
//!
//! Plain data types shared by the storage layer and services.

pub mod hook;
pub mod session;
pub mod settings;
pub mod transcript;

pub use hook::{HookInput, HookOutput, HookSpecificOutput};
pub use session::{SessionSummary, StoredSession, MAX_DECISIONS, MAX_INITIAL_REQUEST_CHARS};
pub use settings::{BridgeConfig, DEFAULT_DECISION_VERBS};
pub use transcript::{Message, MessageContent, Role};
