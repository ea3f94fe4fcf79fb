//! Tracing initialisation

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::WizardError;

/// Installs the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `log_level` is used, then `info`.
/// Fails when a global subscriber is already installed.
pub fn init_tracing(log_level: &str) -> Result<(), WizardError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| WizardError::configuration(format!("tracing already initialised: {}", e)))
}
