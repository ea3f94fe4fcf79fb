//! Wizard errors

use thiserror::Error;

use domain_document::DocumentError;
use domain_reservation::{FieldErrors, ReservationError, Section, StorageError};

/// Errors returned by the wizard controller
///
/// None of these end the session; each is scoped to the action that
/// raised it.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The submitted section failed its rules; nothing was changed
    #[error("Validation failed for {section} section: {errors}")]
    Validation { section: Section, errors: FieldErrors },

    /// A section other than the active one was submitted
    #[error("Cannot submit {submitted} section while on {active:?}")]
    WrongSection {
        active: Option<Section>,
        submitted: Section,
    },

    /// Finalisation found empty sections; the wizard stays on Payment
    #[error("Reservation is missing sections: {missing:?}")]
    MissingData { missing: Vec<Section> },

    /// A stored record cannot be printed; `section` must be resubmitted
    /// before Payment can succeed
    #[error("The {section} section must be corrected: {reason}")]
    InvalidSection { section: Section, reason: String },

    /// The document could not be rendered; the wizard stays on Payment
    #[error("Document could not be produced: {0}")]
    Render(String),

    /// A document is being rendered
    #[error("Wizard is busy finalising the reservation")]
    Busy,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Reservation(ReservationError),
}

impl WizardError {
    pub fn configuration(message: impl Into<String>) -> Self {
        WizardError::Configuration(message.into())
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            WizardError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// True when the user may retry finalisation without changing anything
    pub fn is_retryable(&self) -> bool {
        matches!(self, WizardError::Render(_) | WizardError::Busy)
    }
}

impl From<DocumentError> for WizardError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::MissingData { missing } => WizardError::MissingData { missing },
            DocumentError::InvalidSection { section, reason } => {
                WizardError::InvalidSection { section, reason }
            }
            DocumentError::Reservation(inner) => WizardError::from(inner),
            other => WizardError::Render(other.to_string()),
        }
    }
}

impl From<ReservationError> for WizardError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::MissingData { missing } => WizardError::MissingData { missing },
            other => WizardError::Reservation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprintable_section_is_not_retryable() {
        let err = WizardError::from(DocumentError::invalid_section(Section::Stay, "zero nights"));
        assert!(matches!(
            err,
            WizardError::InvalidSection {
                section: Section::Stay,
                ..
            }
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_render_failure_is_retryable() {
        let err = WizardError::from(DocumentError::render("disk full"));
        assert!(matches!(err, WizardError::Render(_)));
        assert!(err.is_retryable());
    }
}
