//! Wizard configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

use domain_reservation::DEFAULT_DAMAGE_DEPOSIT;
use domain_document::{DEFAULT_LOCALE, DEFAULT_PAGE_LINES};

/// Wizard configuration
///
/// Every field has a default, so an environment may set any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Key the snapshot is stored under
    pub storage_key: String,
    /// Directory of the file-backed snapshot store
    pub storage_dir: PathBuf,
    /// Requested document locale
    pub locale: String,
    /// IANA timezone used for "today"
    pub timezone: String,
    /// Damage deposit pre-filled on a new payment form
    pub default_damage_deposit: Decimal,
    /// Lines per rendered page
    pub page_line_capacity: usize,
    /// Log level
    pub log_level: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            storage_key: "rezervasyon_form_data".to_string(),
            storage_dir: PathBuf::from(".rezervasyon"),
            locale: DEFAULT_LOCALE.to_string(),
            timezone: "Europe/Istanbul".to_string(),
            default_damage_deposit: DEFAULT_DAMAGE_DEPOSIT,
            page_line_capacity: DEFAULT_PAGE_LINES,
            log_level: "info".to_string(),
        }
    }
}

impl WizardConfig {
    /// Loads configuration from `RESERVATION_*` environment variables
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("RESERVATION").try_parsing(true))
    }

    /// Loads configuration from any `config` source
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}
