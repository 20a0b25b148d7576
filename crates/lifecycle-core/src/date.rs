//! # Date Field — Midnight-UTC Transition Dates
//!
//! `TransitionDate` is the `<Date>` sub-element. Producers are told to send
//! ISO 8601, but in practice they send RFC 3339 timestamps, so that is what
//! the parser accepts, explicit offsets included.
//!
//! ## Invariant
//!
//! A present date is exactly midnight UTC: hour, minute, second and
//! sub-second all zero, offset zero. Offsets are compared numerically, so
//! `Z`, `+00:00` and `-00:00` are all accepted, and `+01:00` is not, even
//! when the instant it denotes falls on a UTC midnight.
//!
//! Encoding always emits the `Z` form with whole seconds
//! (`2024-01-01T00:00:00Z`).
//!
//! `0001-01-01T00:00:00Z` is the zero instant. It decodes to the absent
//! sentinel, so a document carrying it behaves as if `<Date>` were missing.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::TransitionError;

/// A midnight-UTC date, or the absent sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TransitionDate(Option<DateTime<Utc>>);

impl TransitionDate {
    /// The absent sentinel.
    pub const ABSENT: Self = Self(None);

    /// Midnight UTC at the start of `date`.
    pub fn midnight(date: NaiveDate) -> Self {
        Self::from_midnight(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }

    /// Wrap an existing UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::DateNotMidnightUtc`] unless `dt` is exactly
    /// midnight.
    pub fn from_utc(dt: DateTime<Utc>) -> Result<Self, TransitionError> {
        if !is_midnight(&dt) {
            return Err(TransitionError::DateNotMidnightUtc);
        }
        Ok(Self::from_midnight(dt))
    }

    /// Parse the text content of a `<Date>` element.
    ///
    /// The text is parsed as-is; surrounding whitespace makes it invalid.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::InvalidDateFormat`] if the text is not RFC 3339.
    /// - [`TransitionError::DateNotMidnightUtc`] if it parses but carries a
    ///   time of day or a non-zero offset.
    pub fn decode(raw: &str) -> Result<Self, TransitionError> {
        let parsed =
            DateTime::parse_from_rfc3339(raw).map_err(|_| TransitionError::InvalidDateFormat)?;
        if parsed.offset().local_minus_utc() != 0 || !is_midnight(&parsed) {
            return Err(TransitionError::DateNotMidnightUtc);
        }
        Ok(Self::from_midnight(parsed.with_timezone(&Utc)))
    }

    fn from_midnight(dt: DateTime<Utc>) -> Self {
        if Some(dt.date_naive()) == NaiveDate::from_ymd_opt(1, 1, 1) {
            Self::ABSENT
        } else {
            Self(Some(dt))
        }
    }

    /// RFC 3339 text for the `<Date>` element, or `None` when absent.
    pub fn encode(&self) -> Option<String> {
        self.0
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Whether this is the absent sentinel.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// The calendar date, if any.
    pub fn date_naive(&self) -> Option<NaiveDate> {
        self.0.map(|dt| dt.date_naive())
    }
}

fn is_midnight<T: Timelike>(t: &T) -> bool {
    t.hour() == 0 && t.minute() == 0 && t.second() == 0 && t.nanosecond() == 0
}

impl TryFrom<String> for TransitionDate {
    type Error = TransitionError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::decode(&raw)
    }
}

impl Serialize for TransitionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.encode() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl std::fmt::Display for TransitionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.encode() {
            Some(text) => f.write_str(&text),
            None => f.write_str("<absent>"),
        }
    }
}
