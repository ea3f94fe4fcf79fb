//! Money types with precise decimal arithmetic
//!
//! Amounts are held as `rust_decimal::Decimal` so that totals, upfront
//! payments and deposits never pick up floating-point drift. Display follows
//! the single supported locale: whole units, `.` as the thousands separator
//! and a trailing currency symbol (`20.000 TL`).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    TRY,
    EUR,
    USD,
    GBP,
}

impl Currency {
    /// Returns the symbol printed after an amount
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::TRY => "TL",
            Currency::EUR => "€",
            Currency::USD => "$",
            Currency::GBP => "£",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::TRY => "TRY",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),
}

/// A monetary amount with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, stored with at most 4 decimal places
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates a Turkish lira amount
    pub fn try_lira(amount: Decimal) -> Self {
        Self::new(amount, Currency::TRY)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly below zero
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Subtraction clamped at zero: `max(self - other, 0)`
    pub fn saturating_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        let difference = self.checked_sub(other)?;
        if difference.is_negative() {
            Ok(Money::zero(self.currency))
        } else {
            Ok(difference)
        }
    }

    /// Rounds to whole units, half away from zero
    pub fn round_whole(&self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }

    /// Formats as whole units with `.` grouping and a trailing symbol
    pub fn format_whole(&self) -> String {
        let rounded = self.round_whole().amount;
        let digits = rounded.abs().trunc().normalize().to_string();
        let grouped = group_thousands(&digits, '.');
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{} {}", sign, grouped, self.currency.symbol())
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_whole())
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_groups_thousands() {
        assert_eq!(Money::try_lira(dec!(20000)).format_whole(), "20.000 TL");
        assert_eq!(Money::try_lira(dec!(1234567)).format_whole(), "1.234.567 TL");
        assert_eq!(Money::try_lira(dec!(999)).format_whole(), "999 TL");
        assert_eq!(Money::try_lira(dec!(0)).format_whole(), "0 TL");
    }

    #[test]
    fn test_format_whole_rounds_half_away_from_zero() {
        assert_eq!(Money::try_lira(dec!(1499.5)).format_whole(), "1.500 TL");
        assert_eq!(Money::try_lira(dec!(1499.49)).format_whole(), "1.499 TL");
        assert_eq!(Money::try_lira(dec!(5000.00)).format_whole(), "5.000 TL");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(Money::try_lira(dec!(-2500)).format_whole(), "-2.500 TL");
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let total = Money::try_lira(dec!(3000));
        let upfront = Money::try_lira(dec!(5000));
        assert!(total.saturating_sub(&upfront).unwrap().is_zero());
        assert_eq!(
            upfront.saturating_sub(&total).unwrap().amount(),
            dec!(2000)
        );
    }

    #[test]
    fn test_currency_mismatch() {
        let lira = Money::try_lira(dec!(100));
        let euro = Money::new(dec!(100), Currency::EUR);

        let result = lira.checked_add(&euro);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }
}
