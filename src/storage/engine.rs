//! SQLite storage engine: schema lifecycle and per-operation connections

use rusqlite::{Connection, ErrorCode, Transaction};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Schema for the task table. Safe to run on every startup.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    status TEXT NOT NULL CHECK(status IN ('todo','doing','done'))
);
";

/// Errors raised by the storage engine
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable at {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StorageError {
    /// Whether the backing file itself could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StorageError::Unavailable { .. })
    }
}

/// Owns the location of the database file and hands out scoped connections.
///
/// No connection is kept between operations: each call to
/// [`StorageEngine::with_transaction`] opens the file, runs one transaction
/// and closes it again.
#[derive(Debug, Clone)]
pub struct StorageEngine {
    path: PathBuf,
}

impl StorageEngine {
    /// Create an engine for the database file at `path`.
    ///
    /// Nothing is opened until the first operation. Parent directories are
    /// never created.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StorageEngine { path: path.into() }
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the task table if it does not exist yet
    pub fn initialize(&self) -> Result<(), StorageError> {
        self.with_transaction(|tx| tx.execute_batch(SCHEMA))?;
        log::debug!("Schema ready at {:?}", self.path);
        Ok(())
    }

    /// Run `f` inside a transaction on a freshly opened connection.
    ///
    /// Commits when `f` succeeds, rolls back when it fails. The connection is
    /// closed before this returns on every path.
    pub fn with_transaction<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    {
        let mut conn = self.open()?;
        let tx = conn.transaction().map_err(|e| self.classify(e))?;

        // Dropping an uncommitted transaction rolls it back
        let value = f(&tx).map_err(|e| self.classify(e))?;
        tx.commit().map_err(|e| self.classify(e))?;

        drop(conn);
        log::debug!("Closed connection to {:?}", self.path);
        Ok(value)
    }

    fn open(&self) -> Result<Connection, StorageError> {
        log::debug!("Opening connection to {:?}", self.path);
        Connection::open(&self.path).map_err(|source| StorageError::Unavailable {
            path: self.path.clone(),
            source,
        })
    }

    /// Separate "cannot reach the file" from ordinary query failures
    fn classify(&self, err: rusqlite::Error) -> StorageError {
        match err.sqlite_error_code() {
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::PermissionDenied
                | ErrorCode::ReadOnly
                | ErrorCode::NotADatabase,
            ) => StorageError::Unavailable {
                path: self.path.clone(),
                source: err,
            },
            _ => StorageError::Database(err),
        }
    }
}
