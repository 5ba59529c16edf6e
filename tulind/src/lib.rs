//! Typed registry and calling conventions for the Tulip Indicators engine.
//!
//! ```no_run
//! # #[cfg(feature = "native")]
//! # async fn demo() -> tulind::IndicatorResult<()> {
//! let sma = tulind::native_registry().lookup("sma")?;
//! assert_eq!(sma.start(&[5.into()])?, 4);
//! let output = sma.evaluate(vec![(1..=10).map(f64::from).collect()], &[5.into()]).await?;
//! assert_eq!(output[0].len(), 6);
//! # Ok(())
//! # }
//! ```

pub use tulind_engine::{
    Arity, BackendError, CallPlan, ComputeBackend, ErrorKind, Indicator, IndicatorError,
    IndicatorInfo, IndicatorKind, IndicatorOutput, IndicatorResult, IndicatorType, OptionValue,
    Tulind,
};
#[cfg(feature = "native")]
pub use tulind_engine::{native_registry, NativeBackend};

/// Legacy spellings accepted by lookups.
pub use tulind_indicators::ALIASES;

/// Version of this crate, which tracks the engine release it describes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
