//! Localized text for the reservation document
//!
//! Labels, titles, notes and the footer come from a Fluent resource compiled
//! into the crate. Dates use chrono's locale tables and amounts use the
//! kernel's whole-unit money format. Only `tr-TR` is supported; any other
//! requested locale negotiates down to it.

use chrono::NaiveDate;
use fluent::concurrent::FluentBundle;
use fluent::{FluentArgs, FluentResource, FluentValue};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use tracing::warn;
use unic_langid::LanguageIdentifier;

use core_kernel::Money;
use domain_reservation::{OccupantCategory, PaymentMethod};

use crate::error::DocumentError;

/// Locale every document is produced in when negotiation finds no match
pub const DEFAULT_LOCALE: &str = "tr-TR";

const TR_TR_RESOURCE: &str = include_str!("../locales/tr-TR/document.ftl");

/// Long calendar form, e.g. `16 Mayıs 2023`
const LONG_DATE_PATTERN: &str = "%-d %B %Y";

/// Fluent-backed message lookup for one negotiated locale
pub struct Localizer {
    locale: LanguageIdentifier,
    date_locale: chrono::Locale,
    bundle: FluentBundle<FluentResource>,
}

impl Localizer {
    /// Builds a localizer for the best supported match of `requested`
    pub fn new(requested: &str) -> Result<Self, DocumentError> {
        let default_locale = parse_locale(DEFAULT_LOCALE)?;
        let requested_locale = match requested.parse::<LanguageIdentifier>() {
            Ok(locale) => locale,
            Err(err) => {
                warn!(requested, error = %err, "Unparseable locale, using default");
                default_locale.clone()
            }
        };

        let available = vec![default_locale.clone()];
        let negotiated = negotiate_languages(
            &[requested_locale],
            &available,
            Some(&default_locale),
            NegotiationStrategy::Filtering,
        );
        let locale = negotiated
            .first()
            .map(|l| (*l).clone())
            .unwrap_or(default_locale);

        let resource = FluentResource::try_new(TR_TR_RESOURCE.to_string())
            .map_err(|(_, errors)| DocumentError::Locale(format!("{:?}", errors)))?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| DocumentError::Locale(format!("{:?}", errors)))?;

        Ok(Self {
            locale,
            date_locale: chrono::Locale::tr_TR,
            bundle,
        })
    }

    /// Localizer for the default locale
    pub fn turkish() -> Result<Self, DocumentError> {
        Self::new(DEFAULT_LOCALE)
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Message without arguments; falls back to the message id when missing
    pub fn text(&self, id: &str) -> String {
        self.format(id, None)
    }

    /// Message with string arguments
    pub fn text_with(&self, id: &str, values: &[(&str, String)]) -> String {
        let mut args = FluentArgs::new();
        for (name, value) in values {
            args.set(*name, FluentValue::from(value.clone()));
        }
        self.format(id, Some(&args))
    }

    pub fn long_date(&self, date: NaiveDate) -> String {
        date.format_localized(LONG_DATE_PATTERN, self.date_locale)
            .to_string()
    }

    pub fn money(&self, amount: &Money) -> String {
        amount.format_whole()
    }

    pub fn category(&self, category: OccupantCategory) -> String {
        let id = match category {
            OccupantCategory::Adult => "category-adult",
            OccupantCategory::Child => "category-child",
            OccupantCategory::Infant => "category-infant",
        };
        self.text(id)
    }

    pub fn payment_method(&self, method: PaymentMethod) -> String {
        let id = match method {
            PaymentMethod::BankTransfer => "method-bank-transfer",
            PaymentMethod::CreditCard => "method-credit-card",
            PaymentMethod::Cash => "method-cash",
        };
        self.text(id)
    }

    /// Text for an optional value, `-` when absent
    pub fn or_empty(&self, value: Option<&str>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => self.text("empty-value"),
        }
    }

    fn format(&self, id: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self.bundle.get_message(id).and_then(|m| m.value()) else {
            warn!(message_id = id, locale = %self.locale, "Missing localized message");
            return id.to_string();
        };

        let mut errors = Vec::new();
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(message_id = id, ?errors, "Localized message formatted with errors");
        }
        value.into_owned()
    }
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("locale", &self.locale.to_string())
            .finish()
    }
}

fn parse_locale(tag: &str) -> Result<LanguageIdentifier, DocumentError> {
    tag.parse::<LanguageIdentifier>()
        .map_err(|e| DocumentError::Locale(e.to_string()))
}
