//! Document domain errors

use thiserror::Error;

use domain_reservation::{ReservationError, Section};

use crate::document::SectionKind;

/// Errors raised while composing or rendering a reservation document
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Composition was attempted before every section was submitted
    #[error("Cannot compose document, missing sections: {missing:?}")]
    MissingData { missing: Vec<Section> },

    /// A document handed to the renderer lacks required sections
    #[error("Document is missing sections: {missing:?}")]
    IncompleteDocument { missing: Vec<SectionKind> },

    /// The renderer failed to produce an artifact
    #[error("Render failed: {0}")]
    Render(String),

    #[error("Localization error: {0}")]
    Locale(String),

    /// A stored section record cannot be printed as it is
    ///
    /// Resubmitting Payment alone cannot fix this; `section` must be
    /// resubmitted first.
    #[error("{section} section cannot be printed: {reason}")]
    InvalidSection { section: Section, reason: String },

    #[error(transparent)]
    Reservation(ReservationError),
}

impl DocumentError {
    pub fn render(message: impl Into<String>) -> Self {
        DocumentError::Render(message.into())
    }

    pub fn invalid_section(section: Section, reason: impl ToString) -> Self {
        DocumentError::InvalidSection {
            section,
            reason: reason.to_string(),
        }
    }

    /// True for failures caused by an incomplete aggregate
    pub fn is_missing_data(&self) -> bool {
        matches!(self, DocumentError::MissingData { .. })
    }
}

impl From<ReservationError> for DocumentError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::MissingData { missing } => DocumentError::MissingData { missing },
            other => DocumentError::Reservation(other),
        }
    }
}
