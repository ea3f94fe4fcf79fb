//! Section validation
//!
//! Each section has one named rule set: the declarative field rules derived
//! on its form plus a small set of cross-field rules checked here. Every
//! submission goes through [`SectionValidator::validate`].
//!
//! # Rule sets
//!
//! ## Renter
//! - full name at least 3 characters
//! - national ID of exactly 11 digits, or a 6-12 character passport number
//! - phone with at least 10 digits and an optional leading `+`
//! - valid email
//! - address, when given, at least 10 characters
//!
//! ## Property
//! - property and owner name at least 3 characters
//! - owner phone as for the renter
//! - address, when given, at least 10 characters
//!
//! ## Stay
//! - check-in and check-out are `YYYY-MM-DD` dates, check-out after check-in
//! - guest count between 1 and 20, one occupant row per guest
//! - each occupant: name at least 3 characters, 11 digit national ID
//!
//! ## Payment
//! - total at least 1; upfront, remaining and deposit not negative
//! - payment date is a `YYYY-MM-DD` date

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use core_kernel::StayPeriod;

use crate::error::FieldErrors;
use crate::forms::{parse_date, PaymentForm, PropertyForm, RenterForm, StayForm};
use crate::sections::{Section, SectionRecord};

const INVALID_DATE: &str = "Geçerli bir tarih giriniz";

/// Raw input for exactly one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionInput {
    Renter(RenterForm),
    Property(PropertyForm),
    Stay(StayForm),
    Payment(PaymentForm),
}

impl SectionInput {
    pub fn section(&self) -> Section {
        match self {
            SectionInput::Renter(_) => Section::Renter,
            SectionInput::Property(_) => Section::Property,
            SectionInput::Stay(_) => Section::Stay,
            SectionInput::Payment(_) => Section::Payment,
        }
    }
}

/// Single validation entry point for all sections
pub struct SectionValidator;

impl SectionValidator {
    /// Validates raw input and converts it into a typed record
    ///
    /// Text is trimmed first and blank optional fields become `None`.
    pub fn validate(input: SectionInput) -> Result<SectionRecord, FieldErrors> {
        match input {
            SectionInput::Renter(form) => Self::validate_renter(form).map(SectionRecord::Renter),
            SectionInput::Property(form) => {
                Self::validate_property(form).map(SectionRecord::Property)
            }
            SectionInput::Stay(form) => Self::validate_stay(form).map(SectionRecord::Stay),
            SectionInput::Payment(form) => {
                Self::validate_payment(form).map(SectionRecord::Payment)
            }
        }
    }

    fn validate_renter(mut form: RenterForm) -> Result<crate::RenterInfo, FieldErrors> {
        form.full_name = trimmed(&form.full_name);
        form.identity_number = trimmed(&form.identity_number);
        form.phone = trimmed(&form.phone);
        form.email = trimmed(&form.email);
        form.address = non_blank(form.address);

        declared_errors(form.validate()).into_result()?;
        Ok(form.into_record())
    }

    fn validate_property(mut form: PropertyForm) -> Result<crate::PropertyInfo, FieldErrors> {
        form.property_name = trimmed(&form.property_name);
        form.owner_name = trimmed(&form.owner_name);
        form.owner_phone = trimmed(&form.owner_phone);
        form.address = non_blank(form.address);

        declared_errors(form.validate()).into_result()?;
        Ok(form.into_record())
    }

    fn validate_stay(mut form: StayForm) -> Result<crate::StayInfo, FieldErrors> {
        form.trim_text();
        let mut errors = declared_errors(form.validate());

        let check_in = parse_if_present(&form.check_in, "check_in", &mut errors);
        let check_out = parse_if_present(&form.check_out, "check_out", &mut errors);
        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            if StayPeriod::new(check_in, check_out).is_err() {
                errors.insert(
                    "check_out",
                    "Çıkış tarihi giriş tarihinden sonra olmalıdır",
                );
            }
        }

        if !form.occupant_count_matches() {
            errors.insert("occupants", "Konaklayan sayısı kişi sayısı ile eşleşmelidir");
        }

        errors.into_result()?;
        match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => Ok(form.into_record(check_in, check_out)),
            _ => {
                let mut missing = FieldErrors::new();
                missing.insert("check_in", INVALID_DATE);
                Err(missing)
            }
        }
    }

    fn validate_payment(mut form: PaymentForm) -> Result<crate::PaymentInfo, FieldErrors> {
        form.payment_date = trimmed(&form.payment_date);
        form.note = non_blank(form.note);

        let mut errors = declared_errors(form.validate());
        let payment_date = parse_if_present(&form.payment_date, "payment_date", &mut errors);

        errors.into_result()?;
        match payment_date {
            Some(date) => Ok(form.into_record(date)),
            None => {
                let mut missing = FieldErrors::new();
                missing.insert("payment_date", INVALID_DATE);
                Err(missing)
            }
        }
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a date field that passed the presence rule
///
/// Empty values already carry a presence error and are skipped.
fn parse_if_present(
    value: &str,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<chrono::NaiveDate> {
    if value.is_empty() {
        return None;
    }
    let parsed = parse_date(value);
    if parsed.is_none() {
        errors.insert(field, INVALID_DATE);
    }
    parsed
}

/// Flattens derived rule failures into field paths
fn declared_errors(result: Result<(), ValidationErrors>) -> FieldErrors {
    let mut out = FieldErrors::new();
    if let Err(errors) = result {
        collect_errors("", &errors, &mut out);
    }
    out
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    out.insert(path, message_of(first));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::OccupantForm;
    use crate::sections::OccupantCategory;
    use rust_decimal_macros::dec;

    fn renter_form() -> RenterForm {
        RenterForm {
            full_name: "Mehmet Demir".to_string(),
            identity_number: "12345678901".to_string(),
            phone: "+905321234567".to_string(),
            email: "mehmet@example.com".to_string(),
            address: None,
        }
    }

    fn stay_form() -> StayForm {
        let mut form = StayForm::new();
        form.check_in = "2024-07-01".to_string();
        form.check_out = "2024-07-08".to_string();
        *form.occupant_mut(0).unwrap() =
            OccupantForm::new("Mehmet Demir", "12345678901", OccupantCategory::Adult);
        form
    }

    #[test]
    fn test_valid_renter_is_trimmed() {
        let mut form = renter_form();
        form.full_name = "  Mehmet Demir ".to_string();
        form.address = Some("   ".to_string());

        match SectionValidator::validate(SectionInput::Renter(form)) {
            Ok(SectionRecord::Renter(info)) => {
                assert_eq!(info.full_name, "Mehmet Demir");
                assert_eq!(info.address, None);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_renter_field_errors() {
        let form = RenterForm {
            full_name: "Al".to_string(),
            identity_number: "123456789".to_string(),
            phone: "0532".to_string(),
            email: "not-an-email".to_string(),
            address: Some("short".to_string()),
        };

        let errors = SectionValidator::validate(SectionInput::Renter(form)).unwrap_err();
        for field in ["full_name", "identity_number", "phone", "email", "address"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert_eq!(errors.get("identity_number"), Some("TC Kimlik No 11 haneli olmalıdır"));
    }

    #[test]
    fn test_passport_number_accepted() {
        let mut form = renter_form();
        form.identity_number = "U12345678".to_string();
        assert!(SectionValidator::validate(SectionInput::Renter(form)).is_ok());
    }

    #[test]
    fn test_nested_occupant_errors_use_indexed_paths() {
        let mut form = stay_form();
        form.set_guest_count(2).unwrap();

        let errors = SectionValidator::validate(SectionInput::Stay(form)).unwrap_err();
        assert!(errors.contains("occupants[1].full_name"));
        assert!(errors.contains("occupants[1].national_id"));
        assert!(!errors.contains("occupants[0].full_name"));
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        let mut form = stay_form();
        form.check_out = "2024-07-01".to_string();

        let errors = SectionValidator::validate(SectionInput::Stay(form)).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["check_out"]);
    }

    #[test]
    fn test_malformed_date() {
        let mut form = stay_form();
        form.check_in = "01/07/2024".to_string();

        let errors = SectionValidator::validate(SectionInput::Stay(form)).unwrap_err();
        assert_eq!(errors.get("check_in"), Some(INVALID_DATE));
    }

    #[test]
    fn test_payment_rules() {
        let mut form = PaymentForm::default();
        form.set_upfront_payment(dec!(-1));

        let errors = SectionValidator::validate(SectionInput::Payment(form)).unwrap_err();
        assert!(errors.contains("total_amount"));
        assert!(errors.contains("upfront_payment"));
        assert!(errors.contains("payment_date"));
        assert!(!errors.contains("damage_deposit"));
    }
}
