use thiserror::Error;
use tulind_indicators::IndicatorKind;

/// Failure reported by a compute backend. The message is surfaced to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The engine that performs indicator mathematics.
///
/// Implementations are invoked from the blocking pool and may be called concurrently; each
/// call receives its own buffers.
pub trait ComputeBackend: Send + Sync {
    /// Version string of the underlying engine.
    fn version(&self) -> &str;

    /// Computes `kind` over `inputs`.
    ///
    /// Every input slice has the same length, `options` has exactly the option count of
    /// `kind`, and `outputs` holds one zeroed buffer per output series, already sized to
    /// `input_len - start`. Implementations fill the buffers in place.
    fn compute(
        &self,
        kind: IndicatorKind,
        inputs: &[&[f64]],
        options: &[f64],
        outputs: &mut [Vec<f64>],
    ) -> Result<(), BackendError>;
}
