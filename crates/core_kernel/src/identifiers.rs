//! Human-facing reservation identifiers
//!
//! A reservation number has the form `REZ-<year>-<nnnn>`. It is printed on the
//! confirmation document and used in its download name; it is not a primary
//! key, so two documents may legitimately share a number.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::ports::RandomSource;
use crate::temporal::Clock;
use chrono::Datelike;

const PREFIX: &str = "REZ";

/// Lowest sequence value; keeps the random component at exactly four digits
pub const SEQUENCE_MIN: u16 = 1000;
/// Highest sequence value
pub const SEQUENCE_MAX: u16 = 9999;

/// Errors raised when parsing or constructing a reservation number
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Malformed reservation number: {0}")]
    Malformed(String),

    #[error("Sequence {0} is outside {SEQUENCE_MIN}..={SEQUENCE_MAX}")]
    SequenceOutOfRange(u16),
}

/// A reservation number such as `REZ-2025-4821`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReservationNumber {
    year: i32,
    sequence: u16,
}

impl ReservationNumber {
    /// Creates a reservation number from its parts
    pub fn new(year: i32, sequence: u16) -> Result<Self, IdentifierError> {
        if !(SEQUENCE_MIN..=SEQUENCE_MAX).contains(&sequence) {
            return Err(IdentifierError::SequenceOutOfRange(sequence));
        }
        Ok(Self { year, sequence })
    }

    /// Generates a number for the current year with a random four-digit suffix
    ///
    /// The suffix is not checked for collisions.
    pub fn generate(clock: &dyn Clock, random: &dyn RandomSource) -> Self {
        let sequence = random
            .next_in_range(SEQUENCE_MIN, SEQUENCE_MAX)
            .clamp(SEQUENCE_MIN, SEQUENCE_MAX);
        Self {
            year: clock.today().year(),
            sequence,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Suggested download name, e.g. `Rezervasyon_REZ-2025-4821.txt`
    pub fn download_file_name(&self, extension: &str) -> String {
        format!("Rezervasyon_{}.{}", self, extension)
    }
}

impl fmt::Display for ReservationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:04}", PREFIX, self.year, self.sequence)
    }
}

impl FromStr for ReservationNumber {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IdentifierError::Malformed(s.to_string());
        let mut parts = s.split('-');

        if parts.next() != Some(PREFIX) {
            return Err(malformed());
        }
        let year = parts
            .next()
            .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or_else(malformed)?;
        let sequence = parts
            .next()
            .filter(|n| n.len() == 4 && n.chars().all(|c| c.is_ascii_digit()))
            .and_then(|n| n.parse::<u16>().ok())
            .ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        Self::new(year, sequence)
    }
}

impl Serialize for ReservationNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReservationNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
