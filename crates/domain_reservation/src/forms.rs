//! Raw section forms
//!
//! A form is the draft a user edits before submitting a section. Forms carry
//! the declarative field rules (via `validator`) and keep the two live
//! invariants of the wizard:
//!
//! - the occupant list always has `guest_count` entries
//! - `remaining_payment` is always `max(total - upfront, 0)`

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use core_kernel::Currency;

use crate::error::ReservationError;
use crate::sections::{
    OccupantCategory, Occupant, PaymentInfo, PaymentMethod, PropertyInfo, RenterInfo, StayInfo,
};

/// Smallest and largest accepted guest count
pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 20;

/// Damage deposit pre-filled on a new payment form
pub const DEFAULT_DAMAGE_DEPOSIT: Decimal = dec!(5000);

const NATIONAL_ID_LEN: usize = 11;
const MIN_PHONE_DIGITS: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]+$").expect("phone pattern is valid"));
static PASSPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{6,12}$").expect("passport pattern is valid"));

/// Renter section draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RenterForm {
    #[validate(length(min = 3, message = "İsim ve soyisim en az 3 karakter olmalıdır"))]
    pub full_name: String,
    #[validate(custom(function = "validate_identity_number"))]
    pub identity_number: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email(message = "Geçerli bir e-posta adresi giriniz"))]
    pub email: String,
    #[validate(length(min = 10, message = "Adres en az 10 karakter olmalıdır"))]
    pub address: Option<String>,
}

impl RenterForm {
    /// Stores the identity number the way the input field shows it
    pub fn set_identity_number(&mut self, raw: &str) {
        self.identity_number = normalize_identity_number(raw);
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = normalize_phone(raw);
    }

    pub(crate) fn into_record(self) -> RenterInfo {
        RenterInfo {
            full_name: self.full_name,
            identity_number: self.identity_number,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

impl From<&RenterInfo> for RenterForm {
    fn from(info: &RenterInfo) -> Self {
        Self {
            full_name: info.full_name.clone(),
            identity_number: info.identity_number.clone(),
            phone: info.phone.clone(),
            email: info.email.clone(),
            address: info.address.clone(),
        }
    }
}

/// Property section draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PropertyForm {
    #[validate(length(min = 3, message = "Villa adı en az 3 karakter olmalıdır"))]
    pub property_name: String,
    #[validate(length(min = 3, message = "Villa sahibi adı en az 3 karakter olmalıdır"))]
    pub owner_name: String,
    #[validate(custom(function = "validate_phone"))]
    pub owner_phone: String,
    #[validate(length(min = 10, message = "Adres en az 10 karakter olmalıdır"))]
    pub address: Option<String>,
}

impl PropertyForm {
    pub fn set_owner_phone(&mut self, raw: &str) {
        self.owner_phone = normalize_phone(raw);
    }

    pub(crate) fn into_record(self) -> PropertyInfo {
        PropertyInfo {
            property_name: self.property_name,
            owner_name: self.owner_name,
            owner_phone: self.owner_phone,
            address: self.address,
        }
    }
}

impl From<&PropertyInfo> for PropertyForm {
    fn from(info: &PropertyInfo) -> Self {
        Self {
            property_name: info.property_name.clone(),
            owner_name: info.owner_name.clone(),
            owner_phone: info.owner_phone.clone(),
            address: info.address.clone(),
        }
    }
}

/// One occupant row inside the stay draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct OccupantForm {
    #[validate(length(min = 3, message = "İsim ve soyisim en az 3 karakter olmalıdır"))]
    pub full_name: String,
    #[validate(custom(function = "validate_national_id"))]
    pub national_id: String,
    pub category: OccupantCategory,
}

impl OccupantForm {
    pub fn new(full_name: impl Into<String>, national_id: &str, category: OccupantCategory) -> Self {
        Self {
            full_name: full_name.into(),
            national_id: normalize_national_id(national_id),
            category,
        }
    }

    pub fn set_national_id(&mut self, raw: &str) {
        self.national_id = normalize_national_id(raw);
    }
}

impl From<&Occupant> for OccupantForm {
    fn from(occupant: &Occupant) -> Self {
        Self {
            full_name: occupant.full_name.clone(),
            national_id: occupant.national_id.clone(),
            category: occupant.category,
        }
    }
}

/// Stay section draft
///
/// Dates are kept as the `YYYY-MM-DD` strings a date input produces.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct StayForm {
    #[validate(length(min = 1, message = "Giriş tarihi seçilmelidir"))]
    pub check_in: String,
    #[validate(length(min = 1, message = "Çıkış tarihi seçilmelidir"))]
    pub check_out: String,
    #[validate(range(min = 1, max = 20, message = "Kişi sayısı 1 ile 20 arasında olmalıdır"))]
    guest_count: u32,
    #[validate(nested)]
    occupants: Vec<OccupantForm>,
}

impl Default for StayForm {
    fn default() -> Self {
        Self {
            check_in: String::new(),
            check_out: String::new(),
            guest_count: MIN_GUESTS,
            occupants: vec![OccupantForm::default()],
        }
    }
}

impl StayForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    pub fn occupants(&self) -> &[OccupantForm] {
        &self.occupants
    }

    pub fn occupant_mut(&mut self, index: usize) -> Option<&mut OccupantForm> {
        self.occupants.get_mut(index)
    }

    /// Changes the guest count and resizes the occupant list to match
    ///
    /// Growing appends default Adult rows; shrinking drops rows from the
    /// tail. Existing rows before the cut are left untouched. Counts outside
    /// `1..=20` are rejected and leave the form unchanged.
    pub fn set_guest_count(&mut self, count: u32) -> Result<(), ReservationError> {
        if !(MIN_GUESTS..=MAX_GUESTS).contains(&count) {
            return Err(ReservationError::GuestCountOutOfRange(count));
        }
        self.occupants.resize_with(count as usize, OccupantForm::default);
        self.guest_count = count;
        Ok(())
    }

    pub(crate) fn occupant_count_matches(&self) -> bool {
        self.occupants.len() == self.guest_count as usize
    }

    pub(crate) fn into_record(self, check_in: chrono::NaiveDate, check_out: chrono::NaiveDate) -> StayInfo {
        StayInfo {
            check_in,
            check_out,
            guest_count: self.guest_count,
            occupants: self
                .occupants
                .into_iter()
                .map(|o| Occupant {
                    full_name: o.full_name,
                    national_id: o.national_id,
                    category: o.category,
                })
                .collect(),
        }
    }

    pub(crate) fn trim_text(&mut self) {
        self.check_in = self.check_in.trim().to_string();
        self.check_out = self.check_out.trim().to_string();
        for occupant in &mut self.occupants {
            occupant.full_name = occupant.full_name.trim().to_string();
            occupant.national_id = occupant.national_id.trim().to_string();
        }
    }
}

impl From<&StayInfo> for StayForm {
    fn from(info: &StayInfo) -> Self {
        Self {
            check_in: info.check_in.format(DATE_FORMAT).to_string(),
            check_out: info.check_out.format(DATE_FORMAT).to_string(),
            guest_count: info.guest_count,
            occupants: info.occupants.iter().map(OccupantForm::from).collect(),
        }
    }
}

/// Payment section draft
///
/// Amount fields are private so that every change goes through a setter
/// that recomputes the remaining balance.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct PaymentForm {
    #[validate(custom(function = "validate_total_amount"))]
    total_amount: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    upfront_payment: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    remaining_payment: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    damage_deposit: Decimal,
    #[validate(length(min = 1, message = "Ödeme tarihi seçilmelidir"))]
    pub payment_date: String,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
    pub currency: Currency,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self::with_deposit(DEFAULT_DAMAGE_DEPOSIT)
    }
}

impl PaymentForm {
    /// Empty form with the given pre-filled damage deposit
    pub fn with_deposit(damage_deposit: Decimal) -> Self {
        Self {
            total_amount: Decimal::ZERO,
            upfront_payment: Decimal::ZERO,
            remaining_payment: Decimal::ZERO,
            damage_deposit,
            payment_date: String::new(),
            payment_method: PaymentMethod::BankTransfer,
            note: None,
            currency: Currency::TRY,
        }
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn upfront_payment(&self) -> Decimal {
        self.upfront_payment
    }

    pub fn remaining_payment(&self) -> Decimal {
        self.remaining_payment
    }

    pub fn damage_deposit(&self) -> Decimal {
        self.damage_deposit
    }

    pub fn set_total_amount(&mut self, amount: Decimal) {
        self.total_amount = amount;
        self.recompute_remaining();
    }

    pub fn set_upfront_payment(&mut self, amount: Decimal) {
        self.upfront_payment = amount;
        self.recompute_remaining();
    }

    pub fn set_damage_deposit(&mut self, amount: Decimal) {
        self.damage_deposit = amount;
        self.recompute_remaining();
    }

    /// Amount collected at check-in for the current draft values
    pub fn total_due_at_check_in(&self) -> Decimal {
        self.remaining_payment + self.damage_deposit
    }

    fn recompute_remaining(&mut self) {
        self.remaining_payment = (self.total_amount - self.upfront_payment).max(Decimal::ZERO);
    }

    pub(crate) fn into_record(self, payment_date: chrono::NaiveDate) -> PaymentInfo {
        use core_kernel::Money;

        PaymentInfo {
            total_amount: Money::new(self.total_amount, self.currency),
            upfront_payment: Money::new(self.upfront_payment, self.currency),
            remaining_payment: Money::new(self.remaining_payment, self.currency),
            damage_deposit: Money::new(self.damage_deposit, self.currency),
            payment_date,
            payment_method: self.payment_method,
            note: self.note,
        }
    }
}

impl From<&PaymentInfo> for PaymentForm {
    fn from(info: &PaymentInfo) -> Self {
        let mut form = Self::with_deposit(info.damage_deposit.amount());
        form.currency = info.total_amount.currency();
        form.total_amount = info.total_amount.amount();
        form.upfront_payment = info.upfront_payment.amount();
        form.recompute_remaining();
        form.payment_date = info.payment_date.format(DATE_FORMAT).to_string();
        form.payment_method = info.payment_method;
        form.note = info.note.clone();
        form
    }
}

/// Digits only, at most 11
pub fn normalize_national_id(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(NATIONAL_ID_LEN)
        .collect()
}

/// National IDs are reduced to digits; passport numbers keep letters and digits
pub fn normalize_identity_number(raw: &str) -> String {
    if raw.chars().any(|c| c.is_ascii_alphabetic()) {
        raw.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect()
    } else {
        normalize_national_id(raw)
    }
}

/// Digits and `+` only; 13 characters for `+90` numbers, otherwise 10
pub fn normalize_phone(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let limit = if cleaned.starts_with("+90") { 13 } else { 10 };
    cleaned.chars().take(limit).collect()
}

pub(crate) fn parse_date(value: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    if value.len() != NATIONAL_ID_LEN {
        return Err(rule_error("national_id_length", "TC Kimlik No 11 haneli olmalıdır"));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(rule_error(
            "national_id_digits",
            "TC Kimlik No sadece rakamlardan oluşmalıdır",
        ));
    }
    Ok(())
}

fn validate_identity_number(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        return validate_national_id(value);
    }
    if PASSPORT_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(rule_error(
            "identity_number",
            "Geçerli bir TC Kimlik veya pasaport numarası giriniz",
        ))
    }
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_PATTERN.is_match(value) {
        return Err(rule_error("phone_format", "Geçerli bir telefon numarası giriniz"));
    }
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(rule_error(
            "phone_length",
            "Telefon numarası en az 10 haneli olmalıdır",
        ));
    }
    Ok(())
}

fn validate_total_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ONE {
        return Err(rule_error("total_amount", "Toplam tutar girilmelidir"));
    }
    Ok(())
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(rule_error("non_negative", "Tutar 0 veya daha büyük olmalıdır"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_national_id() {
        assert_eq!(normalize_national_id("123 456-789 01 99"), "12345678901");
        assert_eq!(normalize_national_id("abc"), "");
    }

    #[test]
    fn test_normalize_identity_number_keeps_passport_letters() {
        assert_eq!(normalize_identity_number("u 1234 567"), "U1234567");
        assert_eq!(normalize_identity_number("123 456 789 01"), "12345678901");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+90 532 123 45 67"), "+905321234567");
        assert_eq!(normalize_phone("(0532) 123 45 67 89"), "0532123456");
    }

    #[test]
    fn test_guest_count_resize_keeps_prefix() {
        let mut form = StayForm::new();
        form.occupant_mut(0).unwrap().full_name = "Ayşe Yılmaz".to_string();

        form.set_guest_count(3).unwrap();
        assert_eq!(form.occupants().len(), 3);
        assert_eq!(form.occupants()[0].full_name, "Ayşe Yılmaz");
        assert_eq!(form.occupants()[1], OccupantForm::default());
        assert_eq!(form.occupants()[2].category, OccupantCategory::Adult);

        form.set_guest_count(1).unwrap();
        assert_eq!(form.occupants().len(), 1);
        assert_eq!(form.occupants()[0].full_name, "Ayşe Yılmaz");
    }

    #[test]
    fn test_guest_count_out_of_range_leaves_form_unchanged() {
        let mut form = StayForm::new();
        assert!(matches!(
            form.set_guest_count(0),
            Err(ReservationError::GuestCountOutOfRange(0))
        ));
        assert!(form.set_guest_count(21).is_err());
        assert_eq!(form.guest_count(), 1);
        assert_eq!(form.occupants().len(), 1);
    }

    #[test]
    fn test_payment_setters_recompute_remaining() {
        let mut form = PaymentForm::default();
        assert_eq!(form.damage_deposit(), dec!(5000));

        form.set_total_amount(dec!(20000));
        form.set_upfront_payment(dec!(5000));
        assert_eq!(form.remaining_payment(), dec!(15000));
        assert_eq!(form.total_due_at_check_in(), dec!(20000));

        form.set_upfront_payment(dec!(25000));
        assert_eq!(form.remaining_payment(), dec!(0));
        assert_eq!(form.total_due_at_check_in(), dec!(5000));
    }
}
