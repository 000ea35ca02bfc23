//! # Log file bootstrap.
//!
//! Creates the scaffold's log file at `<dir>/main.log` and installs a
//! `tracing-subscriber` collector writing to it. The default level comes
//! from the given [`Verbosity`]; a `RUST_LOG` environment variable, when
//! set, takes precedence so individual runs can be turned up without
//! touching the settings file.
//!
//! Enabled with the `logging` feature. Call once at startup:
//!
//! ```no_run
//! use appcrust::{logging, Verbosity};
//!
//! logging::init_logging("log", Verbosity::Info)?;
//! tracing::info!("scaffold ready");
//! # Ok::<(), appcrust::logging::LoggingError>(())
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// File name used inside the log directory.
const LOG_FILE: &str = "main.log";

/// Errors produced while setting up the log file.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The log directory or file could not be created.
    #[error("logging io error at {path:?}: {source}")]
    Io {
        /// Path involved in the failing operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global tracing collector is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Creates `<dir>/main.log` and installs a file-writing collector.
///
/// Records append to the existing file across runs. Calling this twice (or
/// after any other global collector was installed) is an error rather than a
/// silent re-install.
pub fn init_logging(dir: impl AsRef<Path>, verbosity: Verbosity) -> Result<PathBuf, LoggingError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| LoggingError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::Io {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A process can only install one global collector, so the happy path and
    // the double-init error share a single test.
    #[test]
    fn test_init_creates_file_and_rejects_second_install() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_logging(dir.path(), Verbosity::Debug).unwrap();
        assert!(path.exists());
        tracing::info!("log line for the file");

        let again = init_logging(dir.path(), Verbosity::Info);
        assert!(matches!(again, Err(LoggingError::AlreadyInitialized(_))));
    }
}
