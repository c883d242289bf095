//! Calendar date on which a booking session takes place.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Date of a session, serialized as `YYYY-MM-DD`.
///
/// Deserialization also accepts a full date-time and keeps its date part,
/// since the registry echoes dates back with a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionDate(NaiveDate);

impl SessionDate {
    /// Creates a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "date",
                    format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
                )
            })
    }
}

impl From<NaiveDate> for SessionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for SessionDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, WIRE_FORMAT) {
            return Ok(Self(date));
        }
        if let Some(ts) = Timestamp::parse(s) {
            return Ok(Self(ts.as_datetime().date_naive()));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .map(|dt| Self(dt.date()))
            .map_err(|_| ValidationError::invalid_format("date", format!("'{}' is not a date", s)))
    }
}

impl Serialize for SessionDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
