//! Session Memory System
//!
//! Rolling per-project memory of past sessions.
//!
//! ## Module Structure
//!
//! - `extraction` : Transcript-to-summary heuristic (first request + decision lines)
//! - `store` : `SessionMemoryStore` with insert, windowed pruning, and recent queries
//! - `context` : Markdown rendering of retrieved sessions

pub mod context;
pub mod extraction;
pub mod store;

pub use context::{format_context, ContextOptions};
pub use extraction::{DecisionMatcher, Extraction, SessionExtractor};
pub use store::{NewSession, SessionMemoryStore};
