//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! reservation wizard test suite.
//!
//! # Modules
//!
//! - `fixtures`: Valid section drafts, records and injected capabilities
//! - `builders`: Builders for aggregates and wizard collaborators
//! - `assertions`: Assertion helpers for field errors, money and documents
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

use once_cell::sync::OnceCell;

static TRACING: OnceCell<()> = OnceCell::new();

/// Installs a test-writer tracing subscriber once per test binary
pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
