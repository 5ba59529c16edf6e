//! Scripted compute backends and sample data for exercising the evaluator without the
//! native engine.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;
use tulind_engine::{BackendError, ComputeBackend, IndicatorKind, Tulind};

/// Version string reported by [`ScriptedBackend`].
pub const SCRIPTED_VERSION: &str = "0.8.15-scripted";

/// What a [`ScriptedBackend`] does when asked to compute.
#[derive(Debug, Clone)]
pub enum Script {
    /// Copy the tail of the first input series into every output.
    Tail,
    /// Fill every output with a constant.
    Constant(f64),
    /// Report a backend error with this message.
    Fail(String),
    /// Panic with this message.
    Panic(String),
    /// Shrink every output to this many samples.
    Truncate(usize),
}

/// Arguments observed by a [`ScriptedBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub kind: IndicatorKind,
    pub input_lengths: Vec<usize>,
    pub options: Vec<f64>,
    pub output_lengths: Vec<usize>,
}

/// Deterministic backend that records every invocation.
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn tail() -> Arc<Self> {
        Self::new(Script::Tail)
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Self::new(Script::Fail(message.into()))
    }

    /// Registry bound to this backend.
    pub fn registry(self: &Arc<Self>) -> Tulind {
        Tulind::new(Arc::clone(self) as Arc<dyn ComputeBackend>)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl ComputeBackend for ScriptedBackend {
    fn version(&self) -> &str {
        SCRIPTED_VERSION
    }

    fn compute(
        &self,
        kind: IndicatorKind,
        inputs: &[&[f64]],
        options: &[f64],
        outputs: &mut [Vec<f64>],
    ) -> Result<(), BackendError> {
        self.calls.lock().push(RecordedCall {
            kind,
            input_lengths: inputs.iter().map(|series| series.len()).collect(),
            options: options.to_vec(),
            output_lengths: outputs.iter().map(Vec::len).collect(),
        });
        trace!(indicator = kind.name(), script = ?self.script, "scripted compute");

        match &self.script {
            Script::Tail => {
                let source = inputs.first().copied().unwrap_or_default();
                for output in outputs.iter_mut() {
                    let offset = source.len() - output.len();
                    output.copy_from_slice(&source[offset..]);
                }
                Ok(())
            }
            Script::Constant(value) => {
                for output in outputs.iter_mut() {
                    output.fill(*value);
                }
                Ok(())
            }
            Script::Fail(message) => Err(BackendError::new(message.clone())),
            Script::Panic(message) => panic!("{message}"),
            Script::Truncate(len) => {
                for output in outputs.iter_mut() {
                    output.truncate(*len);
                }
                Ok(())
            }
        }
    }
}

/// `1.0, 2.0, ..., len` as a series.
pub fn ramp(len: usize) -> Vec<f64> {
    (1..=len).map(|value| value as f64).collect()
}

/// `count` copies of a ramp of length `len`, one per input series.
pub fn ramps(count: usize, len: usize) -> Vec<Vec<f64>> {
    vec![ramp(len); count]
}
