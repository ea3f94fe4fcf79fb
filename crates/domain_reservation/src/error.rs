//! Reservation domain errors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::sections::Section;

/// Field-level validation messages keyed by field path
///
/// Nested occupant fields use `occupants[<index>].<field>`. Only the first
/// message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message unless the field already has one
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `Ok(())` when empty, otherwise the errors themselves
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Errors that can occur in the reservation domain
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Reservation is incomplete, missing: {}", display_sections(.missing))]
    MissingData { missing: Vec<Section> },

    #[error("Guest count {0} is outside 1..=20")]
    GuestCountOutOfRange(u32),
}

fn display_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(Section::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
