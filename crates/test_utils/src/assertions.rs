//! Custom Test Assertions
//!
//! Provides assertion helpers for reservation types that give more
//! meaningful failure messages than standard assertions.

use core_kernel::Money;
use domain_document::{RenderedArtifact, ReservationDocument, SectionKind};
use domain_reservation::FieldErrors;
use rust_decimal::Decimal;

/// Asserts that `errors` carries a message for `field`
pub fn assert_field_error(errors: &FieldErrors, field: &str) {
    assert!(
        errors.contains(field),
        "Expected a field error on {field}, got: {errors}"
    );
}

/// Asserts that `errors` carries messages for exactly `fields`
pub fn assert_only_field_errors(errors: &FieldErrors, fields: &[&str]) {
    let mut actual: Vec<&str> = errors.fields().collect();
    let mut expected = fields.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected, "Unexpected field errors: {errors}");
}

/// Asserts a money value's amount regardless of stored scale
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount().normalize(),
        expected.normalize(),
        "Expected {} {}, got {}",
        expected,
        actual.currency(),
        actual
    );
}

/// Asserts that all six sections are present in their fixed order
pub fn assert_sections_in_order(document: &ReservationDocument) {
    let kinds: Vec<SectionKind> = document.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        SectionKind::ALL.to_vec(),
        "Document sections out of order"
    );
}

/// Asserts that every page of a text artifact ends with its numbered footer
pub fn assert_footer_on_every_page(artifact: &RenderedArtifact, reservation_number: &str) {
    let text = artifact
        .as_text()
        .unwrap_or_else(|| panic!("artifact {} is not text", artifact.file_name));
    let pages: Vec<&str> = text.split('\u{000C}').collect();
    assert_eq!(pages.len(), artifact.pages, "Page count mismatch");

    for (i, page) in pages.iter().enumerate() {
        let expected = format!(
            "Sayfa {} / {} - Rezervasyon No: {}",
            i + 1,
            pages.len(),
            reservation_number
        );
        assert_eq!(
            page.trim_end().lines().last(),
            Some(expected.as_str()),
            "Page {} has no footer",
            i + 1
        );
    }
}
