//! Document Composition and Rendering Tests
//!
//! # Test Organization
//!
//! - `composition_tests` - derived amounts, identifier, localized content
//! - `section_order_tests` - fixed six-section structure
//! - `rendering_tests` - pagination, footers, incomplete documents
//! - `proptests` - derived amounts for arbitrary payments

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{Currency, FixedClock, FixedRandom, Money};
use domain_document::{
    DocumentComposer, DocumentError, DocumentRenderer, Localizer, ReservationDocument,
    SectionBody, SectionKind, TextRenderer,
};
use domain_reservation::{
    Occupant, OccupantCategory, PaymentInfo, PaymentMethod, PropertyInfo, RenterInfo,
    ReservationAggregate, Section, StayInfo,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn composer_at(today: NaiveDate, sequence: u16) -> DocumentComposer {
    DocumentComposer::new(
        Localizer::turkish().unwrap(),
        Arc::new(FixedClock::new(today)),
        Arc::new(FixedRandom::new(sequence)),
    )
}

fn occupant(name: &str, id: &str, category: OccupantCategory) -> Occupant {
    Occupant {
        full_name: name.to_string(),
        national_id: id.to_string(),
        category,
    }
}

fn payment(total: Decimal, upfront: Decimal, deposit: Decimal) -> PaymentInfo {
    PaymentInfo {
        total_amount: Money::try_lira(total),
        upfront_payment: Money::try_lira(upfront),
        // deliberately stale
        remaining_payment: Money::try_lira(dec!(123)),
        damage_deposit: Money::try_lira(deposit),
        payment_date: date(2023, 5, 16),
        payment_method: PaymentMethod::BankTransfer,
        note: None,
    }
}

fn aggregate_with(payment: PaymentInfo, occupants: Vec<Occupant>) -> ReservationAggregate {
    ReservationAggregate {
        renter: Some(RenterInfo {
            full_name: "Ayşe Yılmaz".to_string(),
            identity_number: "12345678901".to_string(),
            phone: "5551234567".to_string(),
            email: "ayse@example.com".to_string(),
            address: None,
        }),
        property: Some(PropertyInfo {
            property_name: "Villa Deniz".to_string(),
            owner_name: "Mehmet Kaya".to_string(),
            owner_phone: "+905321234567".to_string(),
            address: Some("Kalkan Mahallesi, Kaş / Antalya".to_string()),
        }),
        stay: Some(StayInfo {
            check_in: date(2023, 7, 1),
            check_out: date(2023, 7, 8),
            guest_count: occupants.len() as u32,
            occupants,
        }),
        payment: Some(payment),
    }
}

fn sample_aggregate() -> ReservationAggregate {
    aggregate_with(
        payment(dec!(20000), dec!(5000), dec!(5000)),
        vec![
            occupant("Ayşe Yılmaz", "12345678901", OccupantCategory::Adult),
            occupant("Can Yılmaz", "10987654321", OccupantCategory::Child),
        ],
    )
}

fn compose_sample() -> ReservationDocument {
    composer_at(date(2024, 3, 1), 1234)
        .compose(&sample_aggregate())
        .unwrap()
}

fn field_value(document: &ReservationDocument, kind: SectionKind, label: &str) -> String {
    let fields = match &document.section(kind).unwrap().body {
        SectionBody::Fields(fields) => fields,
        SectionBody::Payment { fields, .. } => fields,
        other => panic!("section {:?} has no fields: {:?}", kind, other),
    };
    fields
        .iter()
        .find(|f| f.label == label)
        .map(|f| f.value.clone())
        .unwrap_or_else(|| panic!("no field {label}"))
}

// ============================================================================
// COMPOSITION TESTS
// ============================================================================

mod composition_tests {
    use super::*;

    /// 20000 total, 5000 upfront, 5000 deposit
    #[test]
    fn test_remaining_and_total_due() {
        let document = compose_sample();

        assert_eq!(document.remaining_payment.amount(), dec!(15000));
        assert_eq!(document.total_due_at_check_in.amount(), dec!(20000));
        assert_eq!(
            field_value(&document, SectionKind::Payment, "Kalan Ödeme"),
            "15.000 TL",
            "stored remaining value must be ignored"
        );

        match &document.section(SectionKind::Payment).unwrap().body {
            SectionBody::Payment { callout, .. } => {
                assert_eq!(callout.label, "Girişte Ödenecek Toplam Tutar");
                assert_eq!(callout.value, "20.000 TL");
            }
            other => panic!("unexpected payment body: {:?}", other),
        }
    }

    /// Overpayment clamps remaining at zero
    #[test]
    fn test_overpayment_clamps_remaining() {
        let aggregate = aggregate_with(
            payment(dec!(3000), dec!(5000), dec!(5000)),
            vec![occupant("Ayşe Yılmaz", "12345678901", OccupantCategory::Adult)],
        );
        let document = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap();

        assert!(document.remaining_payment.is_zero());
        assert_eq!(document.total_due_at_check_in.amount(), dec!(5000));
    }

    /// Identifier embeds the current year and four digits
    #[test]
    fn test_reservation_number_format() {
        let document = composer_at(date(2025, 1, 10), 42)
            .compose(&sample_aggregate())
            .unwrap();
        let number = document.reservation_number.to_string();

        assert!(number.starts_with("REZ-2025-"));
        let suffix = &number["REZ-2025-".len()..];
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_header_and_dates_are_localized() {
        let document = compose_sample();

        assert_eq!(document.title, "Rezervasyon Formu");
        assert_eq!(document.generated_on, date(2024, 3, 1));
        assert_eq!(
            document.header_lines,
            vec![
                "Rezervasyon No: REZ-2024-1234".to_string(),
                "Tarih: 1 Mart 2024".to_string(),
            ]
        );
        assert_eq!(field_value(&document, SectionKind::Stay, "Giriş Tarihi"), "1 Temmuz 2023");
        assert_eq!(field_value(&document, SectionKind::Stay, "Gece Sayısı"), "7");
        assert_eq!(field_value(&document, SectionKind::Payment, "Ödeme Tarihi"), "16 Mayıs 2023");
    }

    #[test]
    fn test_empty_optionals_render_as_dash() {
        let document = compose_sample();
        assert_eq!(field_value(&document, SectionKind::Renter, "Adres"), "-");
        assert_eq!(
            field_value(&document, SectionKind::Property, "Adres"),
            "Kalkan Mahallesi, Kaş / Antalya"
        );
    }

    #[test]
    fn test_occupant_rows_are_numbered_from_one() {
        let document = compose_sample();
        let rows = document.occupant_rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1", "Ayşe Yılmaz", "12345678901", "Yetişkin"]);
        assert_eq!(rows[1], vec!["2", "Can Yılmaz", "10987654321", "Çocuk"]);
    }

    #[test]
    fn test_missing_stay_is_missing_data() {
        let mut aggregate = sample_aggregate();
        aggregate.stay = None;

        let err = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap_err();
        assert!(err.is_missing_data());
        match err {
            DocumentError::MissingData { missing } => assert_eq!(missing, vec![Section::Stay]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Stored records skip validation; a zero-night stay cannot be printed
    #[test]
    fn test_unprintable_stay_names_the_section() {
        let mut aggregate = sample_aggregate();
        if let Some(stay) = aggregate.stay.as_mut() {
            stay.check_out = stay.check_in;
        }

        let err = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap_err();
        assert!(!err.is_missing_data());
        match &err {
            DocumentError::InvalidSection { section, .. } => assert_eq!(*section, Section::Stay),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "stay section cannot be printed: Check-out 2023-07-01 must be after check-in 2023-07-01"
        );
    }

    #[test]
    fn test_mixed_currency_payment_names_the_section() {
        let mut aggregate = sample_aggregate();
        if let Some(payment) = aggregate.payment.as_mut() {
            payment.upfront_payment = Money::new(dec!(5000), Currency::EUR);
        }

        let err = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap_err();
        assert!(matches!(
            err,
            DocumentError::InvalidSection {
                section: Section::Payment,
                ..
            }
        ));
    }
}

// ============================================================================
// SECTION ORDER TESTS
// ============================================================================

mod section_order_tests {
    use super::*;

    #[test]
    fn test_six_sections_in_fixed_order() {
        let document = compose_sample();
        let kinds: Vec<SectionKind> = document.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
        assert!(document.missing_sections().is_empty());
    }

    #[test]
    fn test_order_independent_of_content() {
        let many: Vec<Occupant> = (0..20)
            .map(|i| occupant(&format!("Misafir {}", i), "12345678901", OccupantCategory::Adult))
            .collect();
        let mut aggregate = aggregate_with(payment(dec!(1), dec!(0), dec!(0)), many);
        if let Some(payment) = aggregate.payment.as_mut() {
            payment.note = Some("Havale açıklamasına rezervasyon numarası yazılacak".to_string());
        }

        let document = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap();
        let kinds: Vec<SectionKind> = document.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn test_notes_block_has_four_items() {
        let document = compose_sample();
        match &document.section(SectionKind::Notes).unwrap().body {
            SectionBody::Notes(notes) => {
                assert_eq!(notes.len(), 4);
                assert!(notes[0].contains("15:00"));
            }
            other => panic!("unexpected notes body: {:?}", other),
        }
    }
}

// ============================================================================
// RENDERING TESTS
// ============================================================================

mod rendering_tests {
    use super::*;

    fn positions(text: &str, needles: &[&str]) -> Vec<usize> {
        needles
            .iter()
            .map(|n| text.find(n).unwrap_or_else(|| panic!("{n} not rendered")))
            .collect()
    }

    #[tokio::test]
    async fn test_renders_sections_in_order() {
        let document = compose_sample();
        let artifact = TextRenderer::new(120).render(&document).await.unwrap();

        assert_eq!(artifact.file_name, "Rezervasyon_REZ-2024-1234.txt");
        assert_eq!(artifact.pages, 1);
        let text = artifact.as_text().unwrap();

        let found = positions(
            text,
            &[
                "Kiracı Bilgileri",
                "Villa Bilgileri",
                "Konaklama Bilgileri",
                "Konaklayanlar Listesi",
                "Ödeme Bilgileri",
                "Önemli Notlar",
            ],
        );
        assert!(found.windows(2).all(|w| w[0] < w[1]), "order: {:?}", found);
        assert!(text.contains("| Girişte Ödenecek Toplam Tutar: 20.000 TL |"));
        assert!(text.contains("Sayfa 1 / 1 - Rezervasyon No: REZ-2024-1234"));
    }

    #[tokio::test]
    async fn test_footer_on_every_page() {
        let many: Vec<Occupant> = (0..20)
            .map(|i| occupant(&format!("Misafir {:02}", i), "12345678901", OccupantCategory::Adult))
            .collect();
        let aggregate = aggregate_with(payment(dec!(20000), dec!(5000), dec!(5000)), many);
        let document = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap();

        let artifact = TextRenderer::new(20).render(&document).await.unwrap();
        assert!(artifact.pages > 1);

        let text = artifact.as_text().unwrap();
        let pages: Vec<&str> = text.split('\u{000C}').collect();
        assert_eq!(pages.len(), artifact.pages);
        for (i, page) in pages.iter().enumerate() {
            let footer = format!("Sayfa {} / {} - Rezervasyon No: REZ-2024-1234", i + 1, pages.len());
            assert_eq!(page.trim_end().lines().last(), Some(footer.as_str()));
            assert!(page.trim().lines().count() <= 20);
        }

        for i in 0..20 {
            assert!(text.contains(&format!("Misafir {:02}", i)), "occupant {i} lost");
        }
    }

    #[tokio::test]
    async fn test_section_title_not_left_at_page_bottom() {
        let many: Vec<Occupant> = (0..12)
            .map(|i| occupant(&format!("Misafir {:02}", i), "12345678901", OccupantCategory::Infant))
            .collect();
        let aggregate = aggregate_with(payment(dec!(20000), dec!(5000), dec!(5000)), many);
        let document = composer_at(date(2024, 3, 1), 1234)
            .compose(&aggregate)
            .unwrap();

        let titles: Vec<String> = document.sections.iter().map(|s| s.title.clone()).collect();
        let artifact = TextRenderer::new(16).render(&document).await.unwrap();

        for page in artifact.as_text().unwrap().split('\u{000C}') {
            let body: Vec<&str> = page.trim().lines().collect();
            // last body line sits above the blank separator and footer
            let last_body = body[..body.len().saturating_sub(2)].last().copied();
            if let Some(line) = last_body {
                assert!(!titles.iter().any(|t| t == line), "title {line} ends a page");
            }
        }
    }

    #[tokio::test]
    async fn test_missing_section_fails_render() {
        let mut document = compose_sample();
        document.sections.retain(|s| s.kind != SectionKind::Occupants);

        let err = TextRenderer::default().render(&document).await.unwrap_err();
        match err {
            DocumentError::IncompleteDocument { missing } => {
                assert_eq!(missing, vec![SectionKind::Occupants])
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_page_size_raised_to_minimum() {
        assert_eq!(TextRenderer::new(3).page_lines(), domain_document::layout::MIN_PAGE_LINES);
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn total_due_is_recomputed(
            total in 1u32..1_000_000,
            upfront in 0u32..1_000_000,
            deposit in 0u32..100_000,
        ) {
            let aggregate = aggregate_with(
                payment(Decimal::from(total), Decimal::from(upfront), Decimal::from(deposit)),
                vec![occupant("Ayşe Yılmaz", "12345678901", OccupantCategory::Adult)],
            );
            let document = composer_at(date(2024, 3, 1), 1234).compose(&aggregate).unwrap();

            let remaining = Decimal::from(total.saturating_sub(upfront));
            prop_assert_eq!(document.remaining_payment.amount(), remaining);
            prop_assert_eq!(
                document.total_due_at_check_in.amount(),
                remaining + Decimal::from(deposit)
            );
        }
    }
}
