//! # JSON-backed settings file.
//!
//! User-editable settings for global parameters, stored as pretty-printed
//! JSON under `<dir>/config.json`. The caller supplies a serde type holding
//! the defaults; the first run writes it out, later runs load whatever the
//! user edited.
//!
//! ## Example
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use appcrust::Settings;
//!
//! #[derive(Serialize, Deserialize)]
//! struct AppSettings {
//!     frequency: String,
//!     dev_mode: bool,
//! }
//!
//! let defaults = AppSettings { frequency: "normal".into(), dev_mode: false };
//! let settings = Settings::load_or_init("config", defaults)?;
//! let frequency: appcrust::Frequency = settings.get().frequency.parse()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// File name used inside the settings directory.
const SETTINGS_FILE: &str = "config.json";

/// Errors produced by settings file I/O.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings directory or file could not be created or read.
    #[error("settings io error at {path:?}: {source}")]
    Io {
        /// Path involved in the failing operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not parse as the expected type.
    #[error("malformed settings file {path:?}: {source}")]
    Malformed {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// A loaded settings file bound to its on-disk location.
pub struct Settings<T> {
    path: PathBuf,
    value: T,
}

impl<T> Settings<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads `<dir>/config.json`, creating it from `defaults` when missing.
    ///
    /// Missing parent directories are created. An existing but malformed
    /// file is an error, not silently replaced: the user's edits are never
    /// discarded.
    pub fn load_or_init(dir: impl AsRef<Path>, defaults: T) -> Result<Self, SettingsError> {
        let dir = dir.as_ref();
        let path = dir.join(SETTINGS_FILE);

        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
                path: path.clone(),
                source,
            })?;
            let value = serde_json::from_str(&raw).map_err(|source| SettingsError::Malformed {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "loaded settings file");
            return Ok(Self { path, value });
        }

        fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let settings = Self {
            path,
            value: defaults,
        };
        settings.save()?;
        tracing::info!(path = %settings.path.display(), "generated new settings file");
        Ok(settings)
    }

    /// Writes the current value back to disk as pretty-printed JSON.
    pub fn save(&self) -> Result<(), SettingsError> {
        let raw = serde_json::to_string_pretty(&self.value).map_err(|source| {
            SettingsError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, raw).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Returns the loaded value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the loaded value mutably; call [`save`](Self::save) to persist.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Returns the on-disk location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
    struct Demo {
        frequency: String,
        retries: u32,
    }

    fn defaults() -> Demo {
        Demo {
            frequency: "normal".to_string(),
            retries: 3,
        }
    }

    #[test]
    fn test_first_run_writes_defaults_then_reloads_them() {
        let dir = tempfile::tempdir().unwrap();
        let created = Settings::load_or_init(dir.path(), defaults()).unwrap();
        assert!(created.path().exists());

        let reloaded: Settings<Demo> = Settings::load_or_init(
            dir.path(),
            Demo {
                frequency: "lazy".to_string(),
                retries: 0,
            },
        )
        .unwrap();
        // Existing file wins over the defaults passed on later runs.
        assert_eq!(*reloaded.get(), defaults());
    }

    #[test]
    fn test_user_edits_survive_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::load_or_init(dir.path(), defaults()).unwrap();
        settings.get_mut().retries = 9;
        settings.save().unwrap();

        let reloaded: Settings<Demo> = Settings::load_or_init(dir.path(), defaults()).unwrap();
        assert_eq!(reloaded.get().retries, 9);
    }

    #[test]
    fn test_malformed_file_is_a_typed_error_not_a_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let res = Settings::<Demo>::load_or_init(dir.path(), defaults());
        assert!(matches!(res, Err(SettingsError::Malformed { .. })));
        // The broken file is left in place for the user to inspect.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
