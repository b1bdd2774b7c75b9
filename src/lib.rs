//! Memory Bridge - Session Memory Library
//!
//! Captures a bounded digest of each coding session (first request plus the
//! actions taken) and keeps the last few per project so the next session can
//! start with that context.
//! It includes:
//! - Transcript extraction and the SQLite rolling-window store
//! - Hook invocation flows that never fail the host
//! - Storage layer (SQLite, JSON config)
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::session::{SessionSummary, StoredSession};
pub use models::settings::BridgeConfig;
pub use services::hooks::{HookOutcome, HookRunner};
pub use services::memory::{SessionExtractor, SessionMemoryStore};
pub use storage::database::Database;
pub use utils::error::{AppError, AppResult};
