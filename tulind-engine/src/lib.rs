//! Evaluator and registry for the Tulip Indicators engine.
//!
//! [`Tulind`] binds every catalog entry to a [`ComputeBackend`]. Each [`Indicator`]
//! validates a call against its metadata before the backend sees it, and offers a future,
//! a callback, and a blocking calling convention.

mod backend;
mod evaluator;
#[cfg(feature = "native")]
mod native;
mod registry;

pub use backend::{BackendError, ComputeBackend};
pub use evaluator::{Indicator, IndicatorOutput};
#[cfg(feature = "native")]
pub use native::{native_registry, NativeBackend};
pub use registry::Tulind;
pub use tulind_indicators::{
    Arity, CallPlan, ErrorKind, IndicatorError, IndicatorInfo, IndicatorKind, IndicatorResult,
    IndicatorType, OptionValue,
};
