//! UTC timestamp scalars.

use std::ops::Deref;

use chrono::{SecondsFormat, SubsecRound, Utc};

use super::{Scalar, ScalarError};

/// An ISO-8601 encoded UTC date string with second precision.
///
/// Any sub-second part is dropped on construction, so the value always
/// round-trips through its wire text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
    /// Wrap a timestamp, truncated to whole seconds.
    pub fn new(value: chrono::DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(0))
    }

    /// The current time.
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Get the timestamp.
    pub fn get(&self) -> chrono::DateTime<Utc> {
        self.0
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self::new(value)
    }
}

impl From<DateTime> for chrono::DateTime<Utc> {
    fn from(value: DateTime) -> Self {
        value.0
    }
}

impl Deref for DateTime {
    type Target = chrono::DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Scalar for DateTime {
    const NAME: &'static str = "DateTime";

    fn encode(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn decode(text: &str) -> Result<Self, ScalarError> {
        parse_utc(text).map(Self::new)
    }
}

scalar_text!(DateTime);
scalar_serde!(DateTime);

/// An ISO-8601 encoded UTC date string with sub-second precision.
///
/// Encodes as many fractional digits as the timestamp carries, up to
/// nanoseconds, with trailing zeros removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreciseDateTime(chrono::DateTime<Utc>);

impl PreciseDateTime {
    /// Wrap a timestamp.
    pub fn new(value: chrono::DateTime<Utc>) -> Self {
        Self(value)
    }

    /// The current time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Get the timestamp.
    pub fn get(&self) -> chrono::DateTime<Utc> {
        self.0
    }
}

impl From<chrono::DateTime<Utc>> for PreciseDateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<PreciseDateTime> for chrono::DateTime<Utc> {
    fn from(value: PreciseDateTime) -> Self {
        value.0
    }
}

impl Deref for PreciseDateTime {
    type Target = chrono::DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Scalar for PreciseDateTime {
    const NAME: &'static str = "PreciseDateTime";

    fn encode(&self) -> String {
        let seconds = self.0.format("%Y-%m-%dT%H:%M:%S");
        // Leap seconds carry nanos past 1e9; `%S` already renders them as 60.
        let nanos = self.0.timestamp_subsec_nanos() % 1_000_000_000;
        if nanos == 0 {
            return format!("{seconds}Z");
        }
        let fraction = format!("{nanos:09}");
        format!("{seconds}.{}Z", fraction.trim_end_matches('0'))
    }

    fn decode(text: &str) -> Result<Self, ScalarError> {
        parse_utc(text).map(Self)
    }
}

scalar_text!(PreciseDateTime);
scalar_serde!(PreciseDateTime);

fn parse_utc(text: &str) -> Result<chrono::DateTime<Utc>, ScalarError> {
    chrono::DateTime::parse_from_rfc3339(text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|source| ScalarError::InvalidDateTime {
            text: text.to_string(),
            source,
        })
}
