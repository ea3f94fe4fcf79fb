//! Snapshot Storage Infrastructure
//!
//! Adapters for the `SnapshotStore` port of the reservation domain. The wizard
//! writes its full snapshot after every successful section submission and
//! reads it back once at start-up.
//!
//! # Adapters
//!
//! - [`InMemorySnapshotStore`]: process-local map, optionally limited to a
//!   byte quota so write failures can be exercised
//! - [`FileSnapshotStore`]: one JSON file per key inside a directory
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_storage::FileSnapshotStore;
//! use domain_reservation::SnapshotVault;
//!
//! let store = Arc::new(FileSnapshotStore::new(".rezervasyon")?);
//! let vault = SnapshotVault::new(store, "rezervasyon_form_data");
//! ```

pub mod adapters;

pub use adapters::{FileSnapshotStore, InMemorySnapshotStore};
