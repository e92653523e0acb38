//! Truncated RFC3339 timestamps for the start of a billing schedule.
//!
//! A payment request carries its start date as text of the exact shape
//! `yyyy-MM-ddTHH:mm:ss.SSSZ`: UTC only, millisecond precision, a literal `Z`
//! and no offset notation. [`StartDate`] is the parsed form of that text, and
//! [`Clock`] is where the encoder gets "now" from when the caller leaves the
//! start date empty.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

static SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").expect("valid regex")
});

/// A UTC instant with millisecond precision.
///
/// # Serialization
///
/// Serialized as truncated RFC3339 text:
///
/// ```json
/// "2024-02-20T09:59:58.030Z"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct StartDate(DateTime<Utc>);

impl StartDate {
    /// Wraps an instant, dropping anything finer than a millisecond.
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.trunc_subsecs(3))
    }

    /// Returns the instant as a `chrono` value.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The text is not a truncated RFC3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected yyyy-MM-ddTHH:mm:ss.SSSZ, got {0:?}")]
pub struct InvalidStartDate(pub String);

impl FromStr for StartDate {
    type Err = InvalidStartDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !SHAPE.is_match(s) {
            return Err(InvalidStartDate(s.to_owned()));
        }
        let naive = NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
            .map_err(|_| InvalidStartDate(s.to_owned()))?;
        Ok(Self(naive.and_utc()))
    }
}

impl Display for StartDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for StartDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StartDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of the current instant.
///
/// The encoder asks its clock for the time only when a request is created
/// without a start date.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
