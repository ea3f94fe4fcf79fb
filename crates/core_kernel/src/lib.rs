//! Core Kernel - Foundational types for the reservation system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money with precise decimal arithmetic and locale formatting
//! - Reservation numbers
//! - Stay periods, timezones and the injected clock
//! - The injected random source

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, FixedClock, StayPeriod, SystemClock, TemporalError, Timezone};
pub use identifiers::{IdentifierError, ReservationNumber};
pub use ports::{FixedRandom, RandomSource, ThreadRandom};
