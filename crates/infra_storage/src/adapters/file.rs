//! File-backed snapshot store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary sibling file
//! that is then renamed over the target, so a crash mid-write leaves the old
//! snapshot intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use domain_reservation::{SnapshotStore, StorageError};

const EXTENSION: &str = "json";

/// [`SnapshotStore`] keeping one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Opens the store, creating `dir` when it does not exist
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    ///
    /// Keys are limited to ASCII letters, digits, `_` and `-` so they can
    /// never escape the directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::unavailable(format!(
                "invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "Snapshot file written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
