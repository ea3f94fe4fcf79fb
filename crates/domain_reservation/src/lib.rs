//! Reservation Domain
//!
//! This crate models the data collected by the four-section booking wizard
//! for a vacation-rental stay, and the state that survives a reload.
//!
//! # Sections
//!
//! ```text
//! Renter -> Property -> Stay (with occupants) -> Payment
//! ```
//!
//! Raw drafts ([`forms`]) are turned into typed records ([`sections`]) by the
//! [`SectionValidator`]. Records are merged into a [`ReservationAggregate`],
//! which is persisted as a [`WizardSnapshot`] through a [`SnapshotStore`].

pub mod sections;
pub mod forms;
pub mod validation;
pub mod aggregate;
pub mod snapshot;
pub mod ports;
pub mod error;

pub use sections::{
    Occupant, OccupantCategory, PaymentInfo, PaymentMethod, PropertyInfo, RenterInfo, Section,
    SectionRecord, StayInfo,
};
pub use forms::{
    normalize_identity_number, normalize_national_id, normalize_phone, OccupantForm, PaymentForm,
    PropertyForm, RenterForm, StayForm, DEFAULT_DAMAGE_DEPOSIT, MAX_GUESTS, MIN_GUESTS,
};
pub use validation::{SectionInput, SectionValidator};
pub use aggregate::{CompleteReservation, ReservationAggregate, WizardStep};
pub use snapshot::{SnapshotVault, WizardSnapshot};
pub use ports::{SnapshotStore, StorageError};
pub use error::{FieldErrors, ReservationError};
