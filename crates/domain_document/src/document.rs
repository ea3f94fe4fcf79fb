//! Reservation document view model
//!
//! A [`ReservationDocument`] is the fully localized, immutable content of one
//! confirmation. It is built by the composer, consumed once by a renderer and
//! never persisted.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{Money, ReservationNumber};

use crate::error::DocumentError;

/// Extension of the rendered artifact
pub const ARTIFACT_EXTENSION: &str = "txt";

/// The six document sections in their fixed output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SectionKind {
    Renter,
    Property,
    Stay,
    Occupants,
    Payment,
    Notes,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Renter,
        SectionKind::Property,
        SectionKind::Stay,
        SectionKind::Occupants,
        SectionKind::Payment,
        SectionKind::Notes,
    ];

    /// Fluent id of the section title
    pub fn title_id(&self) -> &'static str {
        match self {
            SectionKind::Renter => "section-renter",
            SectionKind::Property => "section-property",
            SectionKind::Stay => "section-stay",
            SectionKind::Occupants => "section-occupants",
            SectionKind::Payment => "section-payment",
            SectionKind::Notes => "section-notes",
        }
    }
}

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Highlighted amount shown below the payment summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Callout {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SectionBody {
    Fields(Vec<Field>),
    Table(Table),
    Payment { fields: Vec<Field>, callout: Callout },
    Notes(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSection {
    pub kind: SectionKind,
    pub title: String,
    pub body: SectionBody,
}

/// Localized footer with `{page}` and `{pages}` slots left open
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterTemplate(String);

impl FooterTemplate {
    pub const PAGE_SLOT: &'static str = "{page}";
    pub const PAGES_SLOT: &'static str = "{pages}";

    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn render(&self, page: usize, pages: usize) -> String {
        self.0
            .replace(Self::PAGE_SLOT, &page.to_string())
            .replace(Self::PAGES_SLOT, &pages.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationDocument {
    pub reservation_number: ReservationNumber,
    pub generated_on: NaiveDate,
    pub title: String,
    /// Reservation number and generation date lines, already localized
    pub header_lines: Vec<String>,
    pub sections: Vec<DocumentSection>,
    /// Recomputed at composition, never read from the stored payment
    pub remaining_payment: Money,
    pub total_due_at_check_in: Money,
    pub footer: FooterTemplate,
}

impl ReservationDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Rows of the occupant table, empty when the section is absent
    pub fn occupant_rows(&self) -> &[Vec<String>] {
        match self.section(SectionKind::Occupants).map(|s| &s.body) {
            Some(SectionBody::Table(table)) => &table.rows,
            _ => &[],
        }
    }

    pub fn missing_sections(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| self.section(*kind).is_none())
            .collect()
    }

    pub fn ensure_complete(&self) -> Result<(), DocumentError> {
        let missing = self.missing_sections();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocumentError::IncompleteDocument { missing })
        }
    }

    /// Suggested download name, e.g. `Rezervasyon_REZ-2024-1234.txt`
    pub fn download_file_name(&self) -> String {
        self.reservation_number
            .download_file_name(ARTIFACT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes_only() -> ReservationDocument {
        ReservationDocument {
            reservation_number: ReservationNumber::new(2024, 1234).unwrap(),
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            title: "Rezervasyon Formu".to_string(),
            header_lines: Vec::new(),
            sections: vec![DocumentSection {
                kind: SectionKind::Notes,
                title: "Önemli Notlar".to_string(),
                body: SectionBody::Notes(vec!["not".to_string()]),
            }],
            remaining_payment: Money::zero(Default::default()),
            total_due_at_check_in: Money::zero(Default::default()),
            footer: FooterTemplate::new("Sayfa {page} / {pages}"),
        }
    }

    #[test]
    fn test_footer_slots() {
        let footer = FooterTemplate::new("Sayfa {page} / {pages} - REZ-2024-1234");
        assert_eq!(footer.render(2, 3), "Sayfa 2 / 3 - REZ-2024-1234");
    }

    #[test]
    fn test_missing_sections_reported_in_order() {
        let document = notes_only();
        assert_eq!(
            document.missing_sections(),
            vec![
                SectionKind::Renter,
                SectionKind::Property,
                SectionKind::Stay,
                SectionKind::Occupants,
                SectionKind::Payment,
            ]
        );
        assert!(matches!(
            document.ensure_complete(),
            Err(DocumentError::IncompleteDocument { .. })
        ));
        assert!(document.occupant_rows().is_empty());
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(notes_only().download_file_name(), "Rezervasyon_REZ-2024-1234.txt");
    }
}
