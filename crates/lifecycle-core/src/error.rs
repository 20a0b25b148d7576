//! # Error Types — Transition Decode and Validation Failures
//!
//! A single `thiserror` enum covers both phases of the codec:
//!
//! - **Decode-time** kinds (`Decode`, `InvalidDateFormat`,
//!   `DateNotMidnightUtc`, `NegativeDaysInvalid`) abort the decode of the
//!   whole element. No partially decoded rule is ever observable.
//! - **Validation-time** kinds (`ConflictingTransitionSpec`, `MalformedRule`)
//!   are only produced by [`Transition::validate`](crate::Transition::validate),
//!   so callers can decode untrusted input and inspect it before rejecting.
//!
//! All kinds are terminal for the call that raised them. Nothing here is
//! retryable.

use thiserror::Error;

/// Error raised while decoding or validating a `Transition` element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Malformed markup, a non-numeric `Days` value, or an unexpected root
    /// element.
    #[error("decode error: {0}")]
    Decode(String),

    /// The `Date` text is not an RFC 3339 timestamp.
    #[error("Date must be provided in ISO 8601 format")]
    InvalidDateFormat,

    /// The `Date` parsed, but it is not exactly midnight UTC.
    #[error("'Date' must be at midnight GMT")]
    DateNotMidnightUtc,

    /// The `Days` value parsed as a negative integer.
    #[error("Days must be 0 or greater when used with Transition")]
    NegativeDaysInvalid,

    /// Both `Days` and `Date` were given.
    #[error("Exactly one of Days (0 or greater) or Date (positive ISO 8601 format) should be present inside Transition.")]
    ConflictingTransitionSpec,

    /// Neither `Days` nor `Date` was given, or `StorageClass` is missing.
    #[error("The XML you provided was not well-formed or did not validate against our published schema")]
    MalformedRule,
}

impl TransitionError {
    /// Returns `true` for kinds that only the explicit validation pass raises.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ConflictingTransitionSpec | Self::MalformedRule
        )
    }

    pub(crate) fn decode(msg: impl std::fmt::Display) -> Self {
        Self::Decode(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_kinds_are_flagged() {
        assert!(TransitionError::ConflictingTransitionSpec.is_validation());
        assert!(TransitionError::MalformedRule.is_validation());
    }

    #[test]
    fn decode_kinds_are_not_validation() {
        assert!(!TransitionError::Decode("x".into()).is_validation());
        assert!(!TransitionError::InvalidDateFormat.is_validation());
        assert!(!TransitionError::DateNotMidnightUtc.is_validation());
        assert!(!TransitionError::NegativeDaysInvalid.is_validation());
    }

    #[test]
    fn decode_message_carries_context() {
        let err = TransitionError::decode("invalid digit found in string");
        assert_eq!(err.to_string(), "decode error: invalid digit found in string");
    }
}
