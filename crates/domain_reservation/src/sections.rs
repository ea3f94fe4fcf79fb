//! Typed section records
//!
//! These are the structurally valid records the [`SectionValidator`] produces
//! from raw forms. A record is replaced wholesale when its section is
//! submitted again; nothing mutates it in place.
//!
//! [`SectionValidator`]: crate::validation::SectionValidator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Money, MoneyError};

/// The four ordered data-collection sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Renter,
    Property,
    Stay,
    Payment,
}

impl Section {
    /// All sections in wizard order
    pub const ALL: [Section; 4] = [
        Section::Renter,
        Section::Property,
        Section::Stay,
        Section::Payment,
    ];

    /// Zero-based position in the wizard
    pub fn index(&self) -> usize {
        match self {
            Section::Renter => 0,
            Section::Property => 1,
            Section::Stay => 2,
            Section::Payment => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Renter => "renter",
            Section::Property => "property",
            Section::Stay => "stay",
            Section::Payment => "payment",
        };
        f.write_str(name)
    }
}

/// The person making the booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenterInfo {
    pub full_name: String,
    /// National ID (11 digits) or passport number
    pub identity_number: String,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
}

/// The rented villa and its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub property_name: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub address: Option<String>,
}

/// Age category of an occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OccupantCategory {
    #[default]
    Adult,
    Child,
    Infant,
}

/// One listed person staying at the property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    pub full_name: String,
    pub national_id: String,
    pub category: OccupantCategory,
}

/// Dates and occupants of the stay
///
/// `occupants.len()` always equals `guest_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayInfo {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: u32,
    pub occupants: Vec<Occupant>,
}

/// How the renter pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    CreditCard,
    Cash,
}

/// Amounts agreed for the stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub total_amount: Money,
    pub upfront_payment: Money,
    /// Stored value captured with the form; derived values are recomputed
    /// with [`PaymentInfo::computed_remaining`] wherever they matter.
    pub remaining_payment: Money,
    pub damage_deposit: Money,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

impl PaymentInfo {
    /// `max(total - upfront, 0)`
    pub fn computed_remaining(&self) -> Result<Money, MoneyError> {
        self.total_amount.saturating_sub(&self.upfront_payment)
    }

    /// Remaining balance plus damage deposit, collected on arrival
    pub fn total_due_at_check_in(&self) -> Result<Money, MoneyError> {
        self.computed_remaining()?.checked_add(&self.damage_deposit)
    }
}

/// A validated record for exactly one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRecord {
    Renter(RenterInfo),
    Property(PropertyInfo),
    Stay(StayInfo),
    Payment(PaymentInfo),
}

impl SectionRecord {
    pub fn section(&self) -> Section {
        match self {
            SectionRecord::Renter(_) => Section::Renter,
            SectionRecord::Property(_) => Section::Property,
            SectionRecord::Stay(_) => Section::Stay,
            SectionRecord::Payment(_) => Section::Payment,
        }
    }
}
