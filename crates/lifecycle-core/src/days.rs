//! # Day Count Field
//!
//! `TransitionDays` is the `<Days>` sub-element: a non-negative number of days
//! after object creation at which the transition applies. Zero is the
//! "absent" sentinel, so `<Days>0</Days>` and a missing element decode to the
//! same value and neither is written back out.

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// Non-negative day count. Zero means "not provided".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u64")]
pub struct TransitionDays(u64);

impl TransitionDays {
    /// The absent sentinel.
    pub const ABSENT: Self = Self(0);

    /// Wrap a day count.
    pub fn new(days: u64) -> Self {
        Self(days)
    }

    /// The raw day count.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Parse the text content of a `<Days>` element.
    ///
    /// Surrounding whitespace is ignored and empty text decodes to the absent
    /// value, matching how XML decoders treat empty integer elements.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::Decode`] if the text is not a base-10 integer.
    /// - [`TransitionError::NegativeDaysInvalid`] if the integer is negative.
    pub fn decode(raw: &str) -> Result<Self, TransitionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::ABSENT);
        }
        let days: i64 = trimmed.parse().map_err(|e| {
            TransitionError::decode(format!("invalid Days value {trimmed:?}: {e}"))
        })?;
        Self::try_from(days)
    }

    /// Decimal text for the `<Days>` element, or `None` when absent.
    pub fn encode(&self) -> Option<String> {
        if self.is_absent() {
            None
        } else {
            Some(self.0.to_string())
        }
    }

    /// Whether this is the zero sentinel.
    pub fn is_absent(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i64> for TransitionDays {
    type Error = TransitionError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        u64::try_from(days)
            .map(Self)
            .map_err(|_| TransitionError::NegativeDaysInvalid)
    }
}

impl From<TransitionDays> for u64 {
    fn from(days: TransitionDays) -> Self {
        days.0
    }
}

impl std::fmt::Display for TransitionDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
