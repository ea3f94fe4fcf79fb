//! In-memory snapshot store

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use domain_reservation::{SnapshotStore, StorageError};

/// Process-local [`SnapshotStore`]
///
/// With a quota, a write that would push the total stored bytes above the
/// limit fails with [`StorageError::QuotaExceeded`] and leaves the previous
/// payload in place.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store limited to `bytes` of payload across all keys
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    /// Total payload bytes currently stored
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.values().map(String::len).sum())
            .unwrap_or(0)
    }
}

fn poisoned() -> StorageError {
    StorageError::unavailable("in-memory store lock poisoned")
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + payload.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        entries.insert(key.to_string(), payload.to_string());
        debug!(key, bytes = payload.len(), "In-memory snapshot stored");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
