//! Backend that calls into the native Tulip Indicators library.
//!
//! Indicators are resolved with `ti_find_indicator`. Only the leading fields of the
//! returned record are read (`name`, `full_name`, `start`, `indicator`); their layout is
//! the same in every engine release that exposes `ti_find_indicator`.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::sync::Arc;

use once_cell::sync::Lazy;
use tulind_indicators::IndicatorKind;

use crate::backend::{BackendError, ComputeBackend};
use crate::registry::Tulind;

type StartFn = unsafe extern "C" fn(options: *const f64) -> c_int;
type IndicatorFn = unsafe extern "C" fn(
    size: c_int,
    inputs: *const *const f64,
    options: *const f64,
    outputs: *const *mut f64,
) -> c_int;

#[repr(C)]
#[allow(dead_code)]
struct IndicatorInfoHead {
    name: *const c_char,
    full_name: *const c_char,
    start: Option<StartFn>,
    indicator: Option<IndicatorFn>,
}

const TI_OKAY: c_int = 0;
const TI_INVALID_OPTION: c_int = 1;

#[link(name = "indicators")]
extern "C" {
    fn ti_version() -> *const c_char;
    fn ti_find_indicator(name: *const c_char) -> *const IndicatorInfoHead;
}

static NATIVE: Lazy<Tulind> = Lazy::new(|| Tulind::new(Arc::new(NativeBackend::new())));

/// Process-wide registry bound to the native engine.
pub fn native_registry() -> &'static Tulind {
    &NATIVE
}

/// [`ComputeBackend`] backed by the linked `libindicators`.
#[derive(Debug, Clone)]
pub struct NativeBackend {
    version: String,
}

impl NativeBackend {
    pub fn new() -> Self {
        // SAFETY: `ti_version` returns a pointer to a static NUL-terminated string.
        let version = unsafe { CStr::from_ptr(ti_version()) }
            .to_string_lossy()
            .into_owned();
        Self { version }
    }

    /// Start index as computed by the engine itself, for cross-checking the catalog.
    pub fn engine_start(
        &self,
        kind: IndicatorKind,
        options: &[f64],
    ) -> Result<i32, BackendError> {
        if options.len() != kind.info().options {
            return Err(BackendError::new("option count does not match the catalog"));
        }
        let info = find(kind)?;
        let start = info
            .start
            .ok_or_else(|| BackendError::new(format!("engine has no start function for {kind}")))?;
        // SAFETY: `options` holds exactly the number of options the engine reads.
        Ok(unsafe { start(options.as_ptr()) })
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for NativeBackend {
    fn version(&self) -> &str {
        &self.version
    }

    fn compute(
        &self,
        kind: IndicatorKind,
        inputs: &[&[f64]],
        options: &[f64],
        outputs: &mut [Vec<f64>],
    ) -> Result<(), BackendError> {
        let info = find(kind)?;
        let indicator = info
            .indicator
            .ok_or_else(|| BackendError::new(format!("engine has no evaluator for {kind}")))?;
        let size = inputs.first().map_or(0, |series| series.len());
        let size = c_int::try_from(size)
            .map_err(|_| BackendError::new(format!("{size} samples exceed the engine limit")))?;

        let input_ptrs: Vec<*const f64> = inputs.iter().map(|series| series.as_ptr()).collect();
        let output_ptrs: Vec<*mut f64> = outputs
            .iter_mut()
            .map(|series| series.as_mut_ptr())
            .collect();
        // SAFETY: the evaluator validated input/option counts against the catalog, every input
        // holds `size` samples and every output buffer holds `size - start` samples.
        let status = unsafe {
            indicator(
                size,
                input_ptrs.as_ptr(),
                options.as_ptr(),
                output_ptrs.as_ptr(),
            )
        };
        match status {
            TI_OKAY => Ok(()),
            TI_INVALID_OPTION => Err(BackendError::new("invalid option")),
            other => Err(BackendError::new(format!("engine returned status {other}"))),
        }
    }
}

fn find(kind: IndicatorKind) -> Result<&'static IndicatorInfoHead, BackendError> {
    let name = CString::new(kind.name())
        .map_err(|_| BackendError::new(format!("invalid identifier {kind}")))?;
    // SAFETY: the engine returns either null or a pointer into its static indicator table.
    unsafe { ti_find_indicator(name.as_ptr()).as_ref() }
        .ok_or_else(|| BackendError::new(format!("engine does not export {kind}")))
}
