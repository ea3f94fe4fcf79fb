//! Wizard snapshot and its typed persistence wrapper
//!
//! The snapshot is stored as a single JSON entry of the form
//!
//! ```json
//! { "aggregate": { "renter": …, "property": …, "stay": …, "payment": … },
//!   "currentStepIndex": 2 }
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::aggregate::{ReservationAggregate, WizardStep};
use crate::ports::{SnapshotStore, StorageError};

/// Persisted wizard state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    #[serde(default)]
    pub aggregate: ReservationAggregate,
    #[serde(default)]
    pub current_step_index: usize,
}

impl WizardSnapshot {
    pub fn new(aggregate: ReservationAggregate, step: WizardStep) -> Self {
        Self {
            aggregate,
            current_step_index: step.index(),
        }
    }

    /// The stored step, clamped to the last editable step
    ///
    /// The document is never persisted, so a snapshot taken after completion
    /// resumes on Payment.
    pub fn step(&self) -> WizardStep {
        let index = self.current_step_index.min(WizardStep::Payment.index());
        WizardStep::from_index(index).unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    pub fn from_json(payload: &str) -> Result<Self, StorageError> {
        serde_json::from_str(payload).map_err(|e| StorageError::Corrupt(e.to_string()))
    }
}

/// Reads and writes the snapshot under one key of a [`SnapshotStore`]
#[derive(Clone)]
pub struct SnapshotVault {
    store: Arc<dyn SnapshotStore>,
    key: String,
}

impl SnapshotVault {
    pub fn new(store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the snapshot; `Ok(None)` when nothing is stored
    pub fn load(&self) -> Result<Option<WizardSnapshot>, StorageError> {
        match self.store.read(&self.key)? {
            Some(payload) => WizardSnapshot::from_json(&payload).map(Some),
            None => Ok(None),
        }
    }

    /// Overwrites the stored snapshot with the full current state
    pub fn save(&self, snapshot: &WizardSnapshot) -> Result<(), StorageError> {
        let payload = snapshot.to_json()?;
        self.store.write(&self.key, &payload)?;
        debug!(key = %self.key, bytes = payload.len(), "Snapshot written");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

impl std::fmt::Debug for SnapshotVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotVault").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_json_shape() {
        let json = WizardSnapshot::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["currentStepIndex"], 0);
        for key in ["renter", "property", "stay", "payment"] {
            assert!(value["aggregate"][key].is_null(), "{key} should be null");
        }
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let snapshot = WizardSnapshot::from_json(r#"{"aggregate":{"renter":null}}"#).unwrap();
        assert_eq!(snapshot, WizardSnapshot::default());
    }

    #[test]
    fn test_malformed_payload_is_corrupt() {
        assert!(matches!(
            WizardSnapshot::from_json("{not json"),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_step_index_clamped_to_payment() {
        let snapshot = WizardSnapshot {
            current_step_index: 42,
            ..WizardSnapshot::default()
        };
        assert_eq!(snapshot.step(), WizardStep::Payment);

        let completed = WizardSnapshot::new(ReservationAggregate::new(), WizardStep::Completed);
        assert_eq!(completed.step(), WizardStep::Payment);
    }
}
