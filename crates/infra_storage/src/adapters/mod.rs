//! Snapshot store adapters
//!
//! Each adapter implements `domain_reservation::SnapshotStore`. Keys are
//! opaque strings; payloads are stored exactly as given.

pub mod file;
pub mod memory;

pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;
