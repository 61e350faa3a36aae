//! Persistence of the application state blob.
//!
//! The whole aggregate is stored as one JSON document under a fixed,
//! versioned file name inside the data directory. Loading never fails:
//! a missing file is a fresh start, and an unreadable or malformed file
//! falls back to defaults with a warning. Saving replaces the file
//! atomically (write to a temporary file, then rename) under an advisory
//! lock so two processes cannot interleave writes.

use crate::constants::{STATE_FILE_NAME, STATE_LOCK_FILE_NAME};
use crate::errors::{AppResult, StorageError};
use crate::tracker_core::AppState;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Handle to the persisted state blob inside a data directory.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
    lock_path: PathBuf,
}

impl StateFile {
    /// Creates a handle for the state blob inside `data_dir`. Does not
    /// touch the filesystem; the directory is created on first save.
    pub fn new(data_dir: &Path) -> Self {
        StateFile {
            path: data_dir.join(STATE_FILE_NAME),
            lock_path: data_dir.join(STATE_LOCK_FILE_NAME),
        }
    }

    /// Path of the state blob.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted state, falling back to defaults on any failure.
    ///
    /// Serde fills missing fields from defaults, so blobs written by older
    /// versions load cleanly; only an unreadable file or invalid JSON
    /// discards the stored state, and that is logged rather than raised.
    pub fn load(&self) -> AppState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No state file at {}, starting fresh", self.path.display());
                AppState::default()
            }
            Err(e) => {
                warn!("{}. Starting from defaults.", e);
                AppState::default()
            }
        }
    }

    /// Reads and parses the blob; `Ok(None)` means no file exists yet.
    fn try_load(&self) -> Result<Option<AppState>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Persists the whole aggregate.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Busy` if another process holds the state
    /// lock, or `StorageError::Write` if the directory or replacement file
    /// cannot be written.
    pub fn save(&self, state: &AppState) -> AppResult<()> {
        ensure_data_directory_exists(self.parent_dir())?;

        let _lock = self.acquire_lock()?;

        let json = serde_json::to_string(state).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(self.parent_dir()).map_err(|e| StorageError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        tmp.write_all(json.as_bytes()).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
            if let Err(e) = fs::set_permissions(tmp.path(), permissions) {
                warn!("Failed to set permissions on state file: {}", e);
            }
        }

        tmp.persist(&self.path).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!("State saved to {}", self.path.display());
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Takes the advisory lock guarding state replacement. The lock is
    /// released when the returned file handle drops.
    fn acquire_lock(&self) -> Result<File, StorageError> {
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| StorageError::Write {
                path: self.lock_path.clone(),
                source: e,
            })?;

        lock_file.try_lock_exclusive().map_err(|_| StorageError::Busy {
            path: self.path.clone(),
        })?;

        Ok(lock_file)
    }
}

/// Ensures the data directory exists, creating it (with owner-only
/// permissions) if necessary.
///
/// # Errors
///
/// Returns `StorageError::Write` if the directory cannot be created.
pub fn ensure_data_directory_exists(data_dir: &Path) -> Result<(), StorageError> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| StorageError::Write {
            path: data_dir.to_path_buf(),
            source: e,
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS);
            if let Err(e) = fs::set_permissions(data_dir, permissions) {
                warn!("Failed to set permissions on data directory: {}", e);
            }
        }
    }
    Ok(())
}
