#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Static metadata for every indicator of the Tulip Indicators engine.

/// The indicator table and name lookup.
pub mod catalog;
/// Error type shared across the workspace.
pub mod error;
/// Start-index formulas.
pub mod lookback;
/// Option values accepted by evaluators.
pub mod options;
/// Call-shape validation.
pub mod plan;

/// Re-export of the catalog types for convenience.
pub use crate::catalog::{IndicatorInfo, IndicatorKind, IndicatorType, ALIASES};
/// Re-export of the error types.
pub use crate::error::{Arity, ErrorKind, IndicatorError, IndicatorResult};
/// Re-export of the option value type.
pub use crate::options::OptionValue;
/// Re-export of the validated call plan.
pub use crate::plan::CallPlan;
