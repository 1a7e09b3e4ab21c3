//! Error types for yield curve operations.
//!
//! Three failure classes exist: a bad argument supplied by the caller, a date
//! for which the exchange published no curve, and a parameter source that
//! could not deliver a usable answer.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Caller-supplied value outside the domain of the operation.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected value.
        reason: String,
    },

    /// No parameter snapshot was published for the requested date.
    #[error("No curve parameters published for {date}")]
    NotFound {
        /// The requested trading date.
        date: String,
    },

    /// The parameter source could not be reached or returned garbage.
    #[error("Curve parameter source unavailable: {reason}")]
    SourceUnavailable {
        /// Description of the transport or payload failure.
        reason: String,
    },
}

impl CurveError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(date: impl ToString) -> Self {
        Self::NotFound {
            date: date.to_string(),
        }
    }

    /// Creates a source unavailable error.
    #[must_use]
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }

    /// Returns true for [`CurveError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
