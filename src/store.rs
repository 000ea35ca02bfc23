//! # Embedded datastore bootstrap.
//!
//! Creates and opens the scaffold's SQLite file at `<dir>/app.db` and applies
//! the default schema. Projects built on the scaffold add their own tables on
//! the same connection.
//!
//! Schema statements here are static strings; only values ever go through
//! parameter markers. Identifiers (table/column names) cannot be
//! parameterized in SQLite, so no query built from user input may reach this
//! layer.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

/// File name used inside the data directory.
const STORE_FILE: &str = "app.db";

/// Root table present in every scaffold-based project.
const MASTER_TABLE: &str = "CREATE TABLE IF NOT EXISTS master (
    version TEXT UNIQUE,
    rkey TEXT UNIQUE
)";

/// Errors produced while opening or preparing the datastore.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("store io error at {path:?}: {source}")]
    Io {
        /// Path involved in the failing operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The database could not be opened or the schema could not be applied.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// An open connection to the scaffold's embedded database.
///
/// # Example
/// ```no_run
/// use appcrust::Store;
///
/// let store = Store::open("data")?;
/// store
///     .connection()
///     .execute("CREATE TABLE IF NOT EXISTS cases (id TEXT PRIMARY KEY)", [])?;
/// # Ok::<(), appcrust::StoreError>(())
/// ```
pub struct Store {
    path: PathBuf,
    conn: Connection,
}

impl Store {
    /// Opens `<dir>/app.db`, creating the directory, the file, and the
    /// default schema as needed. Safe to call on every startup.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(STORE_FILE);
        let existed = path.exists();

        let conn = Connection::open(&path)?;
        conn.execute(MASTER_TABLE, [])?;
        conn.execute(
            "INSERT OR IGNORE INTO master (version) VALUES (?1)",
            [env!("CARGO_PKG_VERSION")],
        )?;

        if existed {
            tracing::info!(path = %path.display(), "connected to existing datastore");
        } else {
            tracing::info!(path = %path.display(), "generated new datastore");
        }
        Ok(Self { path, conn })
    }

    /// Returns the underlying connection for project-specific schema and
    /// queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the on-disk location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_file_and_master_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.path().exists());

        let version: String = store
            .connection()
            .query_row("SELECT version FROM master", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        drop(Store::open(dir.path()).unwrap());
        let store = Store::open(dir.path()).unwrap();

        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM master", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
