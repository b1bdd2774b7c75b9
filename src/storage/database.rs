//! SQLite Database
//!
//! Embedded session store using rusqlite with r2d2 connection pooling.
//! A handle is opened, used, and closed within a single invocation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Pooled connection handed out by [`Database::connection`]
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// How long to wait for a connection before giving up on the store
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(3);

/// How long SQLite waits on a lock held by another process
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database handle for the session memory file
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (creating if absent) the database file at `path` and ensure the schema.
    ///
    /// Any failure here is reported as `StorageUnavailable`.
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent).map_err(|e| {
                AppError::storage_unavailable(format!(
                    "Failed to create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let manager = SqliteConnectionManager::file(path)
            .with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(|e| {
                AppError::storage_unavailable(format!(
                    "Failed to open {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let db = Self {
            pool,
            path: Some(path.to_path_buf()),
        };
        db.init_schema()
            .map_err(|e| AppError::storage_unavailable(e.to_string()))?;

        tracing::debug!("[MemoryBridge] Opened store at {}", path.display());
        Ok(db)
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses a single pooled connection so every caller sees the same data.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::storage_unavailable(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool, path: None };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS session_memories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                project_path TEXT NOT NULL,
                initial_request TEXT NOT NULL DEFAULT '',
                decisions TEXT NOT NULL DEFAULT '[]',
                message_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_session_memories_project
             ON session_memories(project_path)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_session_memories_created
             ON session_memories(created_at DESC)",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::storage_unavailable(format!("Failed to get connection: {}", e)))
    }

    /// File backing this handle (`None` for in-memory databases)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Release the handle. Safe to call whether or not anything was written.
    pub fn close(self) {
        if let Some(path) = &self.path {
            tracing::debug!("[MemoryBridge] Closed store at {}", path.display());
        }
        drop(self.pool);
    }

    /// Check whether the schema tables exist
    pub fn is_healthy(&self) -> bool {
        self.connection()
            .and_then(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'session_memories'",
                    [],
                    |row| row.get::<_, i64>(0),
                )
                .map_err(AppError::from)
            })
            .map(|count| count == 1)
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}
