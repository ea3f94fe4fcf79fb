//! Property-Based Test Generators
//!
//! Provides proptest strategies for section records and aggregates that
//! hold the reservation invariants. Person names come from `fake`, seeded
//! by proptest so failing cases shrink and replay.

use chrono::{Duration, NaiveDate};
use core_kernel::Money;
use domain_reservation::{
    Occupant, OccupantCategory, PaymentInfo, PaymentMethod, PropertyInfo, RenterInfo,
    ReservationAggregate, StayInfo, WizardStep, MAX_GUESTS, MIN_GUESTS,
};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

/// Strategy for realistic full names
pub fn name_strategy() -> impl Strategy<Value = String> {
    any::<u64>().prop_map(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let name: String = Name().fake_with_rng(&mut rng);
        name
    })
}

/// Strategy for 11-digit national IDs
pub fn national_id_strategy() -> impl Strategy<Value = String> {
    "[1-9][0-9]{10}"
}

pub fn category_strategy() -> impl Strategy<Value = OccupantCategory> {
    prop_oneof![
        Just(OccupantCategory::Adult),
        Just(OccupantCategory::Child),
        Just(OccupantCategory::Infant),
    ]
}

pub fn payment_method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::BankTransfer),
        Just(PaymentMethod::CreditCard),
        Just(PaymentMethod::Cash),
    ]
}

/// Strategy for dates between 2023 and 2027
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..1800).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .map(|base| base + Duration::days(offset))
            .unwrap_or_default()
    })
}

/// Strategy for whole-lira amounts
pub fn lira_strategy(max: u32) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(Decimal::from)
}

/// Strategy for guest counts inside `1..=20`
pub fn guest_count_strategy() -> impl Strategy<Value = u32> {
    MIN_GUESTS..=MAX_GUESTS
}

pub fn renter_strategy() -> impl Strategy<Value = RenterInfo> {
    (name_strategy(), national_id_strategy(), "5[0-9]{9}", proptest::option::of("[A-Za-z ]{10,40}"))
        .prop_map(|(full_name, identity_number, phone, address)| RenterInfo {
            email: "misafir@example.com".to_string(),
            full_name,
            identity_number,
            phone,
            address,
        })
}

pub fn property_strategy() -> impl Strategy<Value = PropertyInfo> {
    ("Villa [A-Z][a-z]{2,10}", name_strategy(), "\\+905[0-9]{9}").prop_map(
        |(property_name, owner_name, owner_phone)| PropertyInfo {
            property_name,
            owner_name,
            owner_phone,
            address: None,
        },
    )
}

pub fn occupant_strategy() -> impl Strategy<Value = Occupant> {
    (name_strategy(), national_id_strategy(), category_strategy()).prop_map(
        |(full_name, national_id, category)| Occupant {
            full_name,
            national_id,
            category,
        },
    )
}

/// Stays with check-out after check-in and one occupant per guest
pub fn stay_strategy() -> impl Strategy<Value = StayInfo> {
    (date_strategy(), 1i64..30, guest_count_strategy()).prop_flat_map(|(check_in, nights, guests)| {
        proptest::collection::vec(occupant_strategy(), guests as usize).prop_map(move |occupants| {
            StayInfo {
                check_in,
                check_out: check_in + Duration::days(nights),
                guest_count: guests,
                occupants,
            }
        })
    })
}

/// Payments with the stored remaining value consistent with the amounts
pub fn payment_strategy() -> impl Strategy<Value = PaymentInfo> {
    (
        1u32..500_000,
        lira_strategy(500_000),
        lira_strategy(50_000),
        date_strategy(),
        payment_method_strategy(),
        proptest::option::of("[a-z ]{1,30}"),
    )
        .prop_map(|(total, upfront, deposit, payment_date, payment_method, note)| {
            let total = Decimal::from(total);
            PaymentInfo {
                total_amount: Money::try_lira(total),
                upfront_payment: Money::try_lira(upfront),
                remaining_payment: Money::try_lira((total - upfront).max(Decimal::ZERO)),
                damage_deposit: Money::try_lira(deposit),
                payment_date,
                payment_method,
                note,
            }
        })
}

/// Aggregates with any subset of sections present
pub fn aggregate_strategy() -> impl Strategy<Value = ReservationAggregate> {
    (
        proptest::option::of(renter_strategy()),
        proptest::option::of(property_strategy()),
        proptest::option::of(stay_strategy()),
        proptest::option::of(payment_strategy()),
    )
        .prop_map(|(renter, property, stay, payment)| ReservationAggregate {
            renter,
            property,
            stay,
            payment,
        })
}

/// Steps a stored snapshot can resume on
pub fn resumable_step_strategy() -> impl Strategy<Value = WizardStep> {
    prop_oneof![
        Just(WizardStep::Renter),
        Just(WizardStep::Property),
        Just(WizardStep::Stay),
        Just(WizardStep::Payment),
    ]
}
