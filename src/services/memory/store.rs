//! Session Memory Store
//!
//! Per-project rolling window of session summaries stored in SQLite.
//! Records are immutable: they are inserted once and only ever removed by
//! pruning. Ordering is by `created_at`, ties broken by row id.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, TransactionBehavior};

use crate::models::session::{SessionSummary, StoredSession};
use crate::storage::database::{Database, DbConnection};
use crate::utils::error::{AppError, AppResult};

const SELECT_COLUMNS: &str =
    "id, session_id, project_path, initial_request, decisions, message_count, created_at";

/// A summary ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession<'a> {
    pub project_path: &'a str,
    pub session_id: &'a str,
    pub summary: &'a SessionSummary,
    pub message_count: usize,
}

/// Store for session summaries, bound to an open [`Database`]
pub struct SessionMemoryStore<'db> {
    db: &'db Database,
}

impl<'db> SessionMemoryStore<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Append a record with a freshly assigned `created_at`. Returns its row id.
    ///
    /// Does not deduplicate on `session_id`.
    pub fn insert(&self, session: &NewSession<'_>) -> AppResult<i64> {
        let conn = self.get_connection()?;
        insert_row(&conn, session)
    }

    /// Delete all but the `window_size` newest records of `project_path`.
    ///
    /// Returns the number of rows removed; a second call with the same window removes nothing.
    pub fn prune(&self, project_path: &str, window_size: usize) -> AppResult<usize> {
        let conn = self.get_connection()?;
        prune_rows(&conn, project_path, window_size)
    }

    /// Insert and prune the record's partition in one transaction.
    ///
    /// Returns `(row_id, pruned_count)`.
    pub fn insert_and_prune(
        &self,
        session: &NewSession<'_>,
        window_size: usize,
    ) -> AppResult<(i64, usize)> {
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(AppError::op("begin"))?;

        let id = insert_row(&tx, session)?;
        let pruned = prune_rows(&tx, session.project_path, window_size)?;

        tx.commit().map_err(AppError::op("commit"))?;
        Ok((id, pruned))
    }

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Up to `limit` records of `project_path`, newest first.
    pub fn query_recent(&self, project_path: &str, limit: usize) -> AppResult<Vec<StoredSession>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS}
                 FROM session_memories
                 WHERE project_path = ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2"
            ))
            .map_err(AppError::op("query_recent"))?;

        let rows = stmt
            .query_map(params![project_path, to_sql_limit(limit)], row_to_stored_session)
            .map_err(AppError::op("query_recent"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::op("query_recent"))?;
        Ok(rows)
    }

    /// Number of records held for `project_path`
    pub fn count_sessions(&self, project_path: &str) -> AppResult<usize> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM session_memories WHERE project_path = ?1",
                params![project_path],
                |row| row.get(0),
            )
            .map_err(AppError::op("count_sessions"))?;
        Ok(count as usize)
    }

    /// Distinct project paths with stored sessions, most recently active first
    pub fn list_projects(&self) -> AppResult<Vec<String>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(
                "SELECT project_path
                 FROM session_memories
                 GROUP BY project_path
                 ORDER BY MAX(created_at) DESC, project_path",
            )
            .map_err(AppError::op("list_projects"))?;

        let projects = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(AppError::op("list_projects"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(AppError::op("list_projects"))?;
        Ok(projects)
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn get_connection(&self) -> AppResult<DbConnection> {
        self.db.connection()
    }
}

impl std::fmt::Debug for SessionMemoryStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMemoryStore").finish()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn insert_row(conn: &Connection, session: &NewSession<'_>) -> AppResult<i64> {
    let summary = session.summary.clone().clamped();
    let decisions_json = serde_json::to_string(&summary.decisions)?;
    let created_at = next_created_at(conn)?;

    conn.execute(
        "INSERT INTO session_memories
         (session_id, project_path, initial_request, decisions, message_count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session.session_id,
            session.project_path,
            summary.initial_request,
            decisions_json,
            session.message_count as i64,
            created_at,
        ],
    )
    .map_err(AppError::op("insert"))?;

    Ok(conn.last_insert_rowid())
}

fn prune_rows(conn: &Connection, project_path: &str, window_size: usize) -> AppResult<usize> {
    conn.execute(
        "DELETE FROM session_memories
         WHERE project_path = ?1
         AND id NOT IN (
             SELECT id FROM session_memories
             WHERE project_path = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2
         )",
        params![project_path, to_sql_limit(window_size)],
    )
    .map_err(AppError::op("prune"))
}

/// Current UTC time, never earlier than the newest stored `created_at`.
///
/// Timestamps are fixed-width, so string order equals time order.
fn next_created_at(conn: &Connection) -> AppResult<String> {
    let now = format_timestamp(Utc::now());
    let latest: Option<String> = conn
        .query_row("SELECT MAX(created_at) FROM session_memories", [], |row| {
            row.get(0)
        })
        .map_err(AppError::op("insert"))?;

    Ok(match latest {
        Some(latest) if latest > now => latest,
        _ => now,
    })
}

fn format_timestamp(ts: chrono::DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Convert a database row to a StoredSession
fn row_to_stored_session(row: &rusqlite::Row) -> rusqlite::Result<StoredSession> {
    let decisions_json: String = row.get(4)?;
    let decisions: Vec<String> = serde_json::from_str(&decisions_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(StoredSession {
        id: row.get(0)?,
        session_id: row.get(1)?,
        project_path: row.get(2)?,
        summary: SessionSummary {
            initial_request: row.get(3)?,
            decisions,
        },
        message_count: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ============================================================================
// Tests
// ============================================================================
