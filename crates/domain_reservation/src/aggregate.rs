//! Reservation aggregate and wizard steps
//!
//! The aggregate holds one optional record per section. It becomes usable
//! for document composition only once all four are present.

use serde::{Deserialize, Serialize};

use crate::error::ReservationError;
use crate::forms::{PaymentForm, PropertyForm, RenterForm, StayForm};
use crate::sections::{PaymentInfo, PropertyInfo, RenterInfo, Section, SectionRecord, StayInfo};
use crate::validation::SectionInput;

/// Position of the wizard
///
/// `Renter -> Property -> Stay -> Payment -> Completed`, forward one step at
/// a time, back one step from Property, Stay and Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Renter,
    Property,
    Stay,
    Payment,
    Completed,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Renter => 0,
            WizardStep::Property => 1,
            WizardStep::Stay => 2,
            WizardStep::Payment => 3,
            WizardStep::Completed => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(WizardStep::Renter),
            1 => Some(WizardStep::Property),
            2 => Some(WizardStep::Stay),
            3 => Some(WizardStep::Payment),
            4 => Some(WizardStep::Completed),
            _ => None,
        }
    }

    /// The section being edited, `None` once completed
    pub fn section(&self) -> Option<Section> {
        Section::from_index(self.index())
    }

    /// The step after this one
    pub fn next(&self) -> WizardStep {
        WizardStep::from_index(self.index() + 1).unwrap_or(WizardStep::Completed)
    }

    /// The step before this one, if backward navigation is allowed here
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Property => Some(WizardStep::Renter),
            WizardStep::Stay => Some(WizardStep::Property),
            WizardStep::Payment => Some(WizardStep::Stay),
            WizardStep::Renter | WizardStep::Completed => None,
        }
    }
}

impl From<Section> for WizardStep {
    fn from(section: Section) -> Self {
        match section {
            Section::Renter => WizardStep::Renter,
            Section::Property => WizardStep::Property,
            Section::Stay => WizardStep::Stay,
            Section::Payment => WizardStep::Payment,
        }
    }
}

/// All four section records, each absent until submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReservationAggregate {
    pub renter: Option<RenterInfo>,
    pub property: Option<PropertyInfo>,
    pub stay: Option<StayInfo>,
    pub payment: Option<PaymentInfo>,
}

/// Borrowed view of an aggregate with every section present
#[derive(Debug, Clone, Copy)]
pub struct CompleteReservation<'a> {
    pub renter: &'a RenterInfo,
    pub property: &'a PropertyInfo,
    pub stay: &'a StayInfo,
    pub payment: &'a PaymentInfo,
}

impl ReservationAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the record for the record's section
    pub fn merge(&mut self, record: SectionRecord) {
        match record {
            SectionRecord::Renter(info) => self.renter = Some(info),
            SectionRecord::Property(info) => self.property = Some(info),
            SectionRecord::Stay(info) => self.stay = Some(info),
            SectionRecord::Payment(info) => self.payment = Some(info),
        }
    }

    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::Renter => self.renter.is_some(),
            Section::Property => self.property.is_some(),
            Section::Stay => self.stay.is_some(),
            Section::Payment => self.payment.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|s| !self.has_section(*s))
    }

    pub fn missing_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.has_section(*s))
            .collect()
    }

    /// Returns a view with all four records, or the sections still missing
    pub fn complete(&self) -> Result<CompleteReservation<'_>, ReservationError> {
        match (&self.renter, &self.property, &self.stay, &self.payment) {
            (Some(renter), Some(property), Some(stay), Some(payment)) => Ok(CompleteReservation {
                renter,
                property,
                stay,
                payment,
            }),
            _ => Err(ReservationError::MissingData {
                missing: self.missing_sections(),
            }),
        }
    }

    /// A draft pre-filled from the stored record, or the blank default
    pub fn form_for(&self, section: Section) -> SectionInput {
        match section {
            Section::Renter => SectionInput::Renter(
                self.renter.as_ref().map(RenterForm::from).unwrap_or_default(),
            ),
            Section::Property => SectionInput::Property(
                self.property.as_ref().map(PropertyForm::from).unwrap_or_default(),
            ),
            Section::Stay => SectionInput::Stay(
                self.stay.as_ref().map(StayForm::from).unwrap_or_default(),
            ),
            Section::Payment => SectionInput::Payment(
                self.payment.as_ref().map(PaymentForm::from).unwrap_or_default(),
            ),
        }
    }
}
