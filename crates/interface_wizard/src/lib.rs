//! Reservation Wizard Interface
//!
//! The controller a UI drives: one call per section submission, plus back
//! navigation, reset and the data for drafts and the step indicator.
//!
//! # Wiring
//!
//! [`build_controller`] assembles a controller from [`WizardConfig`]:
//!
//! - file-backed snapshot store under `storage_dir`
//! - composer with the system clock in the configured timezone
//! - paged text renderer with the configured page size
//!
//! ```rust,ignore
//! let config = WizardConfig::from_env()?;
//! telemetry::init_tracing(&config.log_level)?;
//! let wizard = build_controller(&config)?;
//! let outcome = wizard.submit_section(form).await?;
//! ```

pub mod config;
pub mod error;
pub mod telemetry;
pub mod wizard;

pub use config::WizardConfig;
pub use error::WizardError;
pub use wizard::{StepProgress, SubmitOutcome, WizardController};

use std::sync::Arc;

use core_kernel::{SystemClock, ThreadRandom, Timezone};
use domain_document::{DocumentComposer, Localizer, TextRenderer};
use domain_reservation::SnapshotVault;
use infra_storage::FileSnapshotStore;

/// Builds a controller backed by the file store described in `config`
pub fn build_controller(config: &WizardConfig) -> Result<WizardController, WizardError> {
    let timezone = Timezone::parse(&config.timezone)
        .map_err(|e| WizardError::configuration(e.to_string()))?;
    let localizer =
        Localizer::new(&config.locale).map_err(|e| WizardError::configuration(e.to_string()))?;

    let store = FileSnapshotStore::new(&config.storage_dir)?;
    let vault = SnapshotVault::new(Arc::new(store), config.storage_key.clone());

    let composer = DocumentComposer::new(
        localizer,
        Arc::new(SystemClock::new(timezone)),
        Arc::new(ThreadRandom),
    );
    let renderer = Arc::new(TextRenderer::new(config.page_line_capacity));

    Ok(WizardController::new(vault, composer, renderer)
        .with_default_deposit(config.default_damage_deposit))
}
