//! Calendar types and the injected clock
//!
//! Domain code never reads the system time directly. Anything that needs
//! "today" receives a [`Clock`], so composition stays deterministic under test.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper used to decide which calendar day "today" is
///
/// Wraps chrono_tz::Tz with string serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timezone::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA name such as `Europe/Istanbul`
    pub fn parse(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(name.to_string()))
    }

    /// Current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Europe::Istanbul)
    }
}

/// Errors related to temporal values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Check-out {check_out} must be after check-in {check_in}")]
    InvalidStay {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// A check-in/check-out pair with check-out strictly after check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, TemporalError> {
        if check_out <= check_in {
            return Err(TemporalError::InvalidStay {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time in a fixed timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Timezone,
}

impl SystemClock {
    pub fn new(timezone: Timezone) -> Self {
        Self { timezone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stay_period_counts_nights() {
        let stay = StayPeriod::new(date(2024, 7, 1), date(2024, 7, 8)).unwrap();
        assert_eq!(stay.nights(), 7);
    }

    #[test]
    fn test_stay_period_rejects_same_day_and_reversed() {
        assert!(StayPeriod::new(date(2024, 7, 1), date(2024, 7, 1)).is_err());
        assert!(matches!(
            StayPeriod::new(date(2024, 7, 8), date(2024, 7, 1)),
            Err(TemporalError::InvalidStay { .. })
        ));
    }

    #[test]
    fn test_timezone_parse() {
        assert_eq!(
            Timezone::parse("Europe/Istanbul").unwrap(),
            Timezone::default()
        );
        assert!(matches!(
            Timezone::parse("Mars/Olympus"),
            Err(TemporalError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(date(2023, 5, 16));
        assert_eq!(clock.today(), date(2023, 5, 16));
    }
}
