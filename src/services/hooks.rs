//! Hook Invocation Flows
//!
//! One function per host lifecycle event. Each runs open → operate → close
//! against the store and never returns an error: failures become
//! [`HookOutcome::Degraded`] so the host step always succeeds.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::hook::{HookInput, HookOutput};
use crate::models::session::StoredSession;
use crate::models::settings::BridgeConfig;
use crate::services::memory::{
    format_context, ContextOptions, Extraction, NewSession, SessionExtractor, SessionMemoryStore,
};
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::absolutize;

/// Why an invocation produced no data
#[derive(Debug)]
pub enum DegradeReason {
    /// Nothing to work with (no transcript, empty transcript). Not an error.
    InputAbsent(String),
    /// Storage or operation failure
    Failed(AppError),
}

/// Result of one hook invocation
#[derive(Debug)]
pub enum HookOutcome<T> {
    Completed(T),
    Degraded(DegradeReason),
}

impl<T> HookOutcome<T> {
    fn absent(reason: impl Into<String>) -> Self {
        HookOutcome::Degraded(DegradeReason::InputAbsent(reason.into()))
    }

    fn from_result(result: AppResult<T>) -> Self {
        match result {
            Ok(value) => HookOutcome::Completed(value),
            Err(e) => HookOutcome::Degraded(DegradeReason::Failed(e)),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, HookOutcome::Completed(_))
    }

    /// Log a degraded outcome and return the data of a completed one.
    pub fn into_completed(self) -> Option<T> {
        match self {
            HookOutcome::Completed(value) => Some(value),
            HookOutcome::Degraded(DegradeReason::InputAbsent(reason)) => {
                tracing::info!("[MemoryBridge] {}", reason);
                None
            }
            HookOutcome::Degraded(DegradeReason::Failed(e)) => {
                tracing::warn!("[MemoryBridge] Error: {}", e);
                None
            }
        }
    }
}

/// What a save invocation persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub session_id: String,
    pub project_path: String,
    pub row_id: i64,
    pub decisions: usize,
    pub pruned: usize,
    pub skipped_lines: usize,
}

/// Runs hook flows against one database file
#[derive(Debug, Clone)]
pub struct HookRunner {
    config: BridgeConfig,
    db_path: PathBuf,
}

impl HookRunner {
    pub fn new(config: BridgeConfig, db_path: PathBuf) -> Self {
        Self { config, db_path }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// PreCompact / session end: extract the transcript and persist its summary.
    pub fn save(&self, input: &HookInput) -> HookOutcome<SaveReport> {
        let extractor = match SessionExtractor::new(&self.config) {
            Ok(extractor) => extractor,
            Err(e) => return HookOutcome::Degraded(DegradeReason::Failed(e)),
        };

        let Some(transcript_path) = input.transcript_path.as_deref().filter(|p| !p.is_empty())
        else {
            return HookOutcome::absent("No transcript path provided");
        };

        let Some(extraction) = extractor.extract_from_path(Path::new(transcript_path)) else {
            return HookOutcome::absent("No summary extracted");
        };

        let session_id = input
            .session_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        HookOutcome::from_result(self.persist(&session_id, input.cwd.as_deref(), &extraction))
    }

    fn persist(
        &self,
        session_id: &str,
        cwd: Option<&str>,
        extraction: &Extraction,
    ) -> AppResult<SaveReport> {
        let project_path = resolve_project_path(cwd)?;
        let db = Database::open(&self.db_path)?;

        let result = SessionMemoryStore::new(&db).insert_and_prune(
            &NewSession {
                project_path: &project_path,
                session_id,
                summary: &extraction.summary,
                message_count: extraction.message_count,
            },
            self.config.window_size,
        );
        db.close();
        let (row_id, pruned) = result?;

        let report = SaveReport {
            session_id: session_id.to_string(),
            project_path,
            row_id,
            decisions: extraction.summary.decisions.len(),
            pruned,
            skipped_lines: extraction.skipped_lines,
        };
        tracing::info!(
            "[MemoryBridge] Saved session {} ({} decisions)",
            report.session_id,
            report.decisions
        );
        Ok(report)
    }

    /// Most recent sessions for `cwd` (or the working directory), newest first.
    ///
    /// A store file that does not exist yet means no memory, not an error.
    pub fn recent(&self, cwd: Option<&str>) -> HookOutcome<Vec<StoredSession>> {
        HookOutcome::from_result(self.query(cwd))
    }

    fn query(&self, cwd: Option<&str>) -> AppResult<Vec<StoredSession>> {
        let project_path = resolve_project_path(cwd)?;
        if !self.db_path.exists() {
            tracing::debug!(
                "[MemoryBridge] No store at {}, nothing to load",
                self.db_path.display()
            );
            return Ok(Vec::new());
        }

        let db = Database::open(&self.db_path)?;
        let sessions =
            SessionMemoryStore::new(&db).query_recent(&project_path, self.config.query_limit);
        db.close();
        sessions
    }

    /// Projects that have stored sessions, most recently active first.
    pub fn projects(&self) -> HookOutcome<Vec<String>> {
        if !self.db_path.exists() {
            return HookOutcome::Completed(Vec::new());
        }
        HookOutcome::from_result(Database::open(&self.db_path).and_then(|db| {
            let projects = SessionMemoryStore::new(&db).list_projects();
            db.close();
            projects
        }))
    }

    /// SessionStart: load recent sessions and render the host payload.
    ///
    /// Completes with `None` when the project has no stored sessions.
    pub fn load(&self, input: &HookInput) -> HookOutcome<Option<HookOutput>> {
        let sessions = match self.recent(input.cwd.as_deref()) {
            HookOutcome::Completed(sessions) => sessions,
            HookOutcome::Degraded(reason) => return HookOutcome::Degraded(reason),
        };
        if sessions.is_empty() {
            return HookOutcome::Completed(None);
        }

        let context = format_context(&sessions, &ContextOptions::from(&self.config));
        tracing::info!(
            "[MemoryBridge] Injected {} session(s) of context",
            sessions.len()
        );
        HookOutcome::Completed(Some(HookOutput::session_start(context)))
    }
}

/// Project partition key: `cwd` if given, else the process working directory, made absolute.
pub fn resolve_project_path(cwd: Option<&str>) -> AppResult<String> {
    let path = match cwd.filter(|c| !c.trim().is_empty()) {
        Some(cwd) => absolutize(Path::new(cwd))?,
        None => std::env::current_dir()?,
    };
    Ok(path.to_string_lossy().into_owned())
}
