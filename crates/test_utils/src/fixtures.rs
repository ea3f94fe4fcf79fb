//! Pre-built Test Fixtures
//!
//! Provides ready-to-use valid drafts and records for every wizard section.
//! These fixtures are consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{FixedClock, FixedRandom, Money};
use domain_reservation::{
    Occupant, OccupantCategory, OccupantForm, PaymentForm, PaymentInfo, PaymentMethod,
    PropertyForm, PropertyInfo, RenterForm, RenterInfo, SectionInput, StayForm, StayInfo,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for dates used across the suite
pub struct DateFixtures;

impl DateFixtures {
    /// "Today" for composed documents
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    pub fn check_in() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    pub fn check_out() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 8).unwrap()
    }

    pub fn payment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    pub fn clock() -> FixedClock {
        FixedClock::new(Self::today())
    }

    /// Random source yielding the sequence of `REZ-2024-1234`
    pub fn random() -> FixedRandom {
        FixedRandom::new(1234)
    }
}

/// Fixture for valid section drafts
pub struct FormFixtures;

impl FormFixtures {
    pub fn renter() -> RenterForm {
        let mut form = RenterForm {
            full_name: "Ayşe Yılmaz".to_string(),
            email: "ayse.yilmaz@example.com".to_string(),
            address: Some("Atatürk Caddesi No: 12, Fethiye".to_string()),
            ..RenterForm::default()
        };
        form.set_identity_number("123 456 789 01");
        form.set_phone("0555 123 45 67");
        form
    }

    pub fn property() -> PropertyForm {
        let mut form = PropertyForm {
            property_name: "Villa Deniz".to_string(),
            owner_name: "Mehmet Kaya".to_string(),
            address: None,
            ..PropertyForm::default()
        };
        form.set_owner_phone("+90 532 123 45 67");
        form
    }

    /// Stay with `guests` valid Adult occupants
    pub fn stay(guests: u32) -> StayForm {
        let mut form = StayForm::new();
        form.check_in = "2024-07-01".to_string();
        form.check_out = "2024-07-08".to_string();
        form.set_guest_count(guests)
            .unwrap_or_else(|e| panic!("fixture guest count {guests}: {e}"));
        for i in 0..guests as usize {
            if let Some(occupant) = form.occupant_mut(i) {
                *occupant = OccupantForm::new(
                    format!("Misafir {:02}", i + 1),
                    &format!("1234567890{}", i % 10),
                    OccupantCategory::Adult,
                );
            }
        }
        form
    }

    pub fn payment(total: Decimal, upfront: Decimal, deposit: Decimal) -> PaymentForm {
        let mut form = PaymentForm::with_deposit(deposit);
        form.set_total_amount(total);
        form.set_upfront_payment(upfront);
        form.payment_date = "2024-03-01".to_string();
        form.payment_method = PaymentMethod::BankTransfer;
        form
    }

    /// Standard amounts: 20000 total, 5000 upfront, 5000 deposit
    pub fn standard_payment() -> PaymentForm {
        Self::payment(dec!(20000), dec!(5000), dec!(5000))
    }

    /// Valid inputs for all four sections in wizard order
    pub fn all_sections() -> Vec<SectionInput> {
        vec![
            SectionInput::Renter(Self::renter()),
            SectionInput::Property(Self::property()),
            SectionInput::Stay(Self::stay(2)),
            SectionInput::Payment(Self::standard_payment()),
        ]
    }
}

/// Fixture for typed section records
pub struct RecordFixtures;

impl RecordFixtures {
    pub fn renter() -> RenterInfo {
        RenterInfo {
            full_name: "Ayşe Yılmaz".to_string(),
            identity_number: "12345678901".to_string(),
            phone: "0555123456".to_string(),
            email: "ayse.yilmaz@example.com".to_string(),
            address: Some("Atatürk Caddesi No: 12, Fethiye".to_string()),
        }
    }

    pub fn property() -> PropertyInfo {
        PropertyInfo {
            property_name: "Villa Deniz".to_string(),
            owner_name: "Mehmet Kaya".to_string(),
            owner_phone: "+905321234567".to_string(),
            address: None,
        }
    }

    pub fn occupant(index: usize) -> Occupant {
        Occupant {
            full_name: format!("Misafir {:02}", index + 1),
            national_id: format!("1234567890{}", index % 10),
            category: OccupantCategory::Adult,
        }
    }

    pub fn stay(guests: u32) -> StayInfo {
        StayInfo {
            check_in: DateFixtures::check_in(),
            check_out: DateFixtures::check_out(),
            guest_count: guests,
            occupants: (0..guests as usize).map(Self::occupant).collect(),
        }
    }

    pub fn payment(total: Decimal, upfront: Decimal, deposit: Decimal) -> PaymentInfo {
        let total_amount = Money::try_lira(total);
        let upfront_payment = Money::try_lira(upfront);
        PaymentInfo {
            remaining_payment: Money::try_lira((total - upfront).max(Decimal::ZERO)),
            total_amount,
            upfront_payment,
            damage_deposit: Money::try_lira(deposit),
            payment_date: DateFixtures::payment_date(),
            payment_method: PaymentMethod::BankTransfer,
            note: None,
        }
    }
}
