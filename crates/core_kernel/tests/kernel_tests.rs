//! Core Kernel Integration Tests
//!
//! # Test Organization
//!
//! - `numbering_tests` - reservation numbers from injected clock and randomness
//! - `serialization_tests` - JSON forms of kernel values
//! - `money_tests` - lira display and arithmetic across values

use chrono::NaiveDate;
use core_kernel::{
    Currency, FixedClock, FixedRandom, Money, MoneyError, ReservationNumber, StayPeriod,
    ThreadRandom, Timezone,
};
use rust_decimal_macros::dec;

fn clock(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::new(NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

// ============================================================================
// NUMBERING TESTS
// ============================================================================

mod numbering_tests {
    use super::*;

    #[test]
    fn test_number_follows_clock_year() {
        let number = ReservationNumber::generate(&clock(2023, 12, 31), &FixedRandom::new(4821));
        assert_eq!(number.to_string(), "REZ-2023-4821");

        let number = ReservationNumber::generate(&clock(2024, 1, 1), &FixedRandom::new(4821));
        assert_eq!(number.to_string(), "REZ-2024-4821");
    }

    #[test]
    fn test_generated_numbers_parse_back() {
        let today = clock(2025, 6, 1);
        for _ in 0..100 {
            let number = ReservationNumber::generate(&today, &ThreadRandom);
            let parsed: ReservationNumber = number.to_string().parse().unwrap();
            assert_eq!(parsed, number);
            assert_eq!(number.to_string().len(), "REZ-2025-0000".len());
        }
    }

    #[test]
    fn test_download_name_carries_number() {
        let number = ReservationNumber::new(2023, 1042).unwrap();
        assert_eq!(
            number.download_file_name("pdf"),
            "Rezervasyon_REZ-2023-1042.pdf"
        );
    }
}

// ============================================================================
// SERIALIZATION TESTS
// ============================================================================

mod serialization_tests {
    use super::*;

    #[test]
    fn test_reservation_number_is_a_json_string() {
        let number = ReservationNumber::new(2024, 7777).unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"REZ-2024-7777\"");

        let back: ReservationNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);
    }

    #[test]
    fn test_malformed_number_rejected_by_serde() {
        assert!(serde_json::from_str::<ReservationNumber>("\"REZ-2024-12\"").is_err());
    }

    #[test]
    fn test_timezone_is_an_iana_name() {
        let tz = Timezone::parse("Europe/Istanbul").unwrap();
        assert_eq!(serde_json::to_string(&tz).unwrap(), "\"Europe/Istanbul\"");
        assert!(serde_json::from_str::<Timezone>("\"Mars/Olympus\"").is_err());
    }

    #[test]
    fn test_money_survives_json() {
        let money = Money::try_lira(dec!(20000.50));
        let json = serde_json::to_string(&money).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}

// ============================================================================
// MONEY TESTS
// ============================================================================

mod money_tests {
    use super::*;

    #[test]
    fn test_total_due_at_check_in() {
        let total = Money::try_lira(dec!(20000));
        let upfront = Money::try_lira(dec!(5000));
        let deposit = Money::try_lira(dec!(5000));

        let remaining = total.saturating_sub(&upfront).unwrap();
        let due = remaining.checked_add(&deposit).unwrap();
        assert_eq!(remaining.format_whole(), "15.000 TL");
        assert_eq!(due.format_whole(), "20.000 TL");
    }

    #[test]
    fn test_overpayment_leaves_only_deposit() {
        let total = Money::try_lira(dec!(12000));
        let upfront = Money::try_lira(dec!(15000));
        let deposit = Money::try_lira(dec!(7500));

        let due = total
            .saturating_sub(&upfront)
            .and_then(|r| r.checked_add(&deposit))
            .unwrap();
        assert_eq!(due.format_whole(), "7.500 TL");
    }

    #[test]
    fn test_foreign_currency_does_not_mix() {
        let lira = Money::try_lira(dec!(100));
        let euro = Money::new(dec!(100), Currency::EUR);
        assert!(matches!(
            lira.checked_add(&euro),
            Err(MoneyError::CurrencyMismatch(..))
        ));
    }

    #[test]
    fn test_stay_length_for_summer_week() {
        let period = StayPeriod::new(
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 8).unwrap(),
        )
        .unwrap();
        assert_eq!(period.nights(), 7);
    }
}
