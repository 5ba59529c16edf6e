//! Error type shared by the catalog and the evaluator.

use std::fmt;

use thiserror::Error;

/// Result alias for indicator operations.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Which argument list an arity check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Number of input series.
    Inputs,
    /// Number of scalar options.
    Options,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inputs => f.write_str("input series"),
            Self::Options => f.write_str("options"),
        }
    }
}

/// Coarse classification of an [`IndicatorError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The identifier is not part of the catalog.
    UnknownIdentifier,
    /// Wrong number of input series or options.
    InvalidArity,
    /// Input series of differing lengths.
    InconsistentInputLength,
    /// An option could not be converted to a usable number.
    InvalidOption,
    /// Fewer samples than the lookback requires.
    InsufficientData,
    /// The compute backend reported a failure.
    BackendFailure,
}

/// Failure variants surfaced by lookups, start-index queries and evaluations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// Raised when an identifier does not name a known indicator.
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),
    /// Raised before any computation when argument counts do not match the metadata.
    #[error("{indicator} expects {expected} {arity}, got {actual}")]
    InvalidArity {
        /// Indicator identifier.
        indicator: &'static str,
        /// Argument list that failed the check.
        arity: Arity,
        /// Count declared by the metadata.
        expected: usize,
        /// Count supplied by the caller.
        actual: usize,
    },
    /// Raised when input series are not all the same length.
    #[error("{indicator} input series must share one length, got {lengths:?}")]
    InconsistentInputLength {
        /// Indicator identifier.
        indicator: &'static str,
        /// Length of every supplied series, in order.
        lengths: Vec<usize>,
    },
    /// Raised when an option is non-numeric or outside the range the lookback accepts.
    #[error("{indicator} option `{option}` is invalid: {reason}")]
    InvalidOption {
        /// Indicator identifier.
        indicator: &'static str,
        /// Display name of the offending option.
        option: &'static str,
        /// Human readable explanation.
        reason: String,
    },
    /// Raised when the input is too short to produce a single output sample.
    #[error("{indicator} needs at least {required} samples, got {actual}")]
    InsufficientData {
        /// Indicator identifier.
        indicator: &'static str,
        /// Minimum input length for one output sample.
        required: usize,
        /// Input length supplied by the caller.
        actual: usize,
    },
    /// Message reported by the compute backend, passed through verbatim.
    #[error("{indicator} backend failure: {message}")]
    Backend {
        /// Indicator identifier.
        indicator: &'static str,
        /// Backend supplied message.
        message: String,
    },
}

impl IndicatorError {
    /// Helper for constructing [`IndicatorError::InvalidOption`].
    pub fn invalid_option(
        indicator: &'static str,
        option: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            indicator,
            option,
            reason: reason.into(),
        }
    }

    /// Helper for constructing [`IndicatorError::Backend`].
    pub fn backend(indicator: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            indicator,
            message: message.into(),
        }
    }

    /// Returns the coarse category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownIndicator(_) => ErrorKind::UnknownIdentifier,
            Self::InvalidArity { .. } => ErrorKind::InvalidArity,
            Self::InconsistentInputLength { .. } => ErrorKind::InconsistentInputLength,
            Self::InvalidOption { .. } => ErrorKind::InvalidOption,
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::Backend { .. } => ErrorKind::BackendFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_names_the_argument_list() {
        let err = IndicatorError::InvalidArity {
            indicator: "sma",
            arity: Arity::Inputs,
            expected: 1,
            actual: 2,
        };
        assert_eq!(err.to_string(), "sma expects 1 input series, got 2");
        assert_eq!(err.kind(), ErrorKind::InvalidArity);
    }

    #[test]
    fn backend_message_is_preserved() {
        let err = IndicatorError::backend("rsi", "invalid option");
        assert_eq!(err.kind(), ErrorKind::BackendFailure);
        assert!(err.to_string().ends_with("invalid option"));
    }
}
