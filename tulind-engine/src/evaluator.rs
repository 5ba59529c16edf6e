use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use tokio::runtime::Handle;
use tracing::{debug, trace, warn};
use tulind_indicators::{
    CallPlan, IndicatorError, IndicatorInfo, IndicatorKind, IndicatorResult, OptionValue,
};

use crate::backend::ComputeBackend;

/// Output of one evaluation: `outputs` series, each `input_len - start` samples long.
pub type IndicatorOutput = Vec<Vec<f64>>;

/// An indicator descriptor: catalog metadata bound to the backend that evaluates it.
///
/// Cloning is cheap; clones share the backend.
#[derive(Clone)]
pub struct Indicator {
    kind: IndicatorKind,
    backend: Arc<dyn ComputeBackend>,
}

impl Indicator {
    pub fn new(kind: IndicatorKind, backend: Arc<dyn ComputeBackend>) -> Self {
        Self { kind, backend }
    }

    pub fn kind(&self) -> IndicatorKind {
        self.kind
    }

    pub fn info(&self) -> &'static IndicatorInfo {
        self.kind.info()
    }

    /// Input index corresponding to the first output sample for `options`.
    pub fn start(&self, options: &[OptionValue]) -> IndicatorResult<usize> {
        self.kind.start_index(options)
    }

    /// Validates a call without running it.
    pub fn prepare(
        &self,
        inputs: &[Vec<f64>],
        options: &[OptionValue],
    ) -> IndicatorResult<CallPlan> {
        let lengths: Vec<usize> = inputs.iter().map(Vec::len).collect();
        self.kind.plan(&lengths, options)
    }

    /// Evaluates on the blocking pool and resolves once the backend finishes.
    ///
    /// Validation failures resolve immediately without touching the backend. When polled
    /// outside a Tokio runtime the backend runs inline on the polling thread. Dropping the
    /// future does not stop a computation that has already been handed to the backend.
    pub async fn evaluate(
        &self,
        inputs: Vec<Vec<f64>>,
        options: &[OptionValue],
    ) -> IndicatorResult<IndicatorOutput> {
        let plan = self.prepare(&inputs, options)?;
        let Ok(handle) = Handle::try_current() else {
            debug!(
                indicator = self.kind.name(),
                input_len = plan.input_len(),
                "no tokio runtime, evaluating inline"
            );
            return run(self.backend.as_ref(), &inputs, &plan);
        };
        debug!(
            indicator = self.kind.name(),
            input_len = plan.input_len(),
            start = plan.start(),
            "dispatching evaluation"
        );
        let backend = Arc::clone(&self.backend);
        let kind = self.kind;
        handle
            .spawn_blocking(move || run(backend.as_ref(), &inputs, &plan))
            .await
            .map_err(|err| {
                IndicatorError::backend(kind.name(), format!("evaluation task failed: {err}"))
            })?
    }

    /// Callback flavour of [`Self::evaluate`].
    ///
    /// `callback` is invoked exactly once, from another task or thread, with either the
    /// output or the error. Inside a Tokio runtime the call is spawned onto it; otherwise a
    /// dedicated thread runs it. If the runtime shuts down before the task finishes, the
    /// callback receives a backend error instead.
    pub fn evaluate_with<F>(&self, inputs: Vec<Vec<f64>>, options: &[OptionValue], callback: F)
    where
        F: FnOnce(IndicatorResult<IndicatorOutput>) + Send + 'static,
    {
        let indicator = self.clone();
        let options = options.to_vec();
        let completion = Completion::new(self.kind.name(), callback);
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let result = indicator.evaluate(inputs, &options).await;
                    completion.complete(result);
                });
            }
            Err(_) => {
                thread::spawn(move || {
                    let result = indicator.evaluate_blocking(&inputs, &options);
                    completion.complete(result);
                });
            }
        }
    }

    /// Evaluates on the calling thread.
    pub fn evaluate_blocking(
        &self,
        inputs: &[Vec<f64>],
        options: &[OptionValue],
    ) -> IndicatorResult<IndicatorOutput> {
        let plan = self.prepare(inputs, options)?;
        debug!(
            indicator = self.kind.name(),
            input_len = plan.input_len(),
            start = plan.start(),
            "evaluating on caller thread"
        );
        run(self.backend.as_ref(), inputs, &plan)
    }
}

impl fmt::Debug for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indicator")
            .field("name", &self.kind.name())
            .field("backend_version", &self.backend.version())
            .finish()
    }
}

/// Delivers a callback's result exactly once, reporting cancellation if dropped unused.
struct Completion<F>
where
    F: FnOnce(IndicatorResult<IndicatorOutput>),
{
    indicator: &'static str,
    callback: Option<F>,
}

impl<F> Completion<F>
where
    F: FnOnce(IndicatorResult<IndicatorOutput>),
{
    fn new(indicator: &'static str, callback: F) -> Self {
        Self {
            indicator,
            callback: Some(callback),
        }
    }

    fn complete(mut self, result: IndicatorResult<IndicatorOutput>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<F> Drop for Completion<F>
where
    F: FnOnce(IndicatorResult<IndicatorOutput>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            warn!(indicator = self.indicator, "evaluation task dropped before completion");
            callback(Err(IndicatorError::backend(
                self.indicator,
                "evaluation task was cancelled",
            )));
        }
    }
}

fn run(
    backend: &dyn ComputeBackend,
    inputs: &[Vec<f64>],
    plan: &CallPlan,
) -> IndicatorResult<IndicatorOutput> {
    let kind = plan.kind();
    let name = kind.name();
    let views: Vec<&[f64]> = inputs.iter().map(Vec::as_slice).collect();
    let mut outputs = vec![vec![0.0; plan.output_len()]; plan.outputs()];

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        backend.compute(kind, &views, plan.options(), &mut outputs)
    }));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => return Err(IndicatorError::backend(name, err.message())),
        Err(payload) => {
            return Err(IndicatorError::backend(
                name,
                format!("backend panicked: {}", panic_message(payload.as_ref())),
            ))
        }
    }

    if let Some(series) = outputs.iter().find(|s| s.len() != plan.output_len()) {
        return Err(IndicatorError::backend(
            name,
            format!(
                "backend produced a series of {} samples, expected {}",
                series.len(),
                plan.output_len()
            ),
        ));
    }
    trace!(indicator = name, outputs = outputs.len(), "evaluation complete");
    Ok(outputs)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
