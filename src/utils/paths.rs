//! Cross-Platform Path Utilities
//!
//! Functions for resolving the memory bridge's files under ~/.claude/.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Claude directory (~/.claude/)
pub fn claude_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".claude"))
}

/// Get the database file path (~/.claude/memory-bridge.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(claude_dir()?.join("memory-bridge.db"))
}

/// Get the config file path (~/.claude/memory-bridge.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(claude_dir()?.join("memory-bridge.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Resolve `path` against the process working directory if it is relative.
pub fn absolutize(path: &Path) -> AppResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
