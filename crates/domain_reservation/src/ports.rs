//! Reservation Domain Ports
//!
//! The wizard persists its snapshot through the [`SnapshotStore`] trait, a
//! synchronous string key-value store scoped to one user session. Adapters
//! live in `infra_storage`:
//!
//! - **In-memory**: process-local, optionally with a byte quota
//! - **File**: one JSON file per key in a directory
//!
//! ```rust,ignore
//! let store: Arc<dyn SnapshotStore> = Arc::new(FileSnapshotStore::new(dir)?);
//! let vault = SnapshotVault::new(store, "rezervasyon_form_data");
//! ```

use thiserror::Error;

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing storage cannot be used at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing would exceed the storage quota
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    /// A stored payload could not be decoded
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable(message.into())
    }
}

/// Durable, synchronous key-value storage for serialized snapshots
pub trait SnapshotStore: Send + Sync {
    /// Reads the payload stored under `key`, `None` when absent
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the payload stored under `key`
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Deletes `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
