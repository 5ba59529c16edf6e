//! Call-shape validation shared by every evaluation path.

use crate::catalog::IndicatorKind;
use crate::error::{Arity, IndicatorError, IndicatorResult};
use crate::options::OptionValue;

/// A validated evaluation request: converted options plus the resulting output geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CallPlan {
    kind: IndicatorKind,
    options: Vec<f64>,
    input_len: usize,
    start: usize,
}

impl CallPlan {
    /// Indicator the plan was built for.
    pub fn kind(&self) -> IndicatorKind {
        self.kind
    }

    /// Options in the numeric form handed to the engine.
    pub fn options(&self) -> &[f64] {
        &self.options
    }

    /// Shared length of every input series.
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Input index of the first output sample.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length of every output series.
    pub fn output_len(&self) -> usize {
        self.input_len - self.start
    }

    /// Number of output series.
    pub fn outputs(&self) -> usize {
        self.kind.info().outputs
    }
}

impl IndicatorKind {
    /// Validates a call given the length of each input series.
    ///
    /// Checks run in a fixed order: input count, option count, equal input lengths, option
    /// conversion, and finally that the input is long enough for one output sample.
    pub fn plan(
        self,
        input_lengths: &[usize],
        options: &[OptionValue],
    ) -> IndicatorResult<CallPlan> {
        let info = self.info();
        if input_lengths.len() != info.inputs {
            return Err(IndicatorError::InvalidArity {
                indicator: info.name,
                arity: Arity::Inputs,
                expected: info.inputs,
                actual: input_lengths.len(),
            });
        }
        if options.len() != info.options {
            return Err(IndicatorError::InvalidArity {
                indicator: info.name,
                arity: Arity::Options,
                expected: info.options,
                actual: options.len(),
            });
        }

        let input_len = input_lengths[0];
        if input_lengths.iter().any(|len| *len != input_len) {
            return Err(IndicatorError::InconsistentInputLength {
                indicator: info.name,
                lengths: input_lengths.to_vec(),
            });
        }

        let options = self.resolve_options(options)?;
        let start = self.start_for(&options)?;
        if input_len <= start {
            return Err(IndicatorError::InsufficientData {
                indicator: info.name,
                required: start + 1,
                actual: input_len,
            });
        }

        Ok(CallPlan {
            kind: self,
            options,
            input_len,
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn opts(values: &[f64]) -> Vec<OptionValue> {
        values.iter().copied().map(OptionValue::from).collect()
    }

    #[test]
    fn sma_over_ten_samples_yields_six() {
        let plan = IndicatorKind::Sma.plan(&[10], &opts(&[5.0])).unwrap();
        assert_eq!(plan.start(), 4);
        assert_eq!(plan.output_len(), 6);
        assert_eq!(plan.outputs(), 1);
        assert_eq!(plan.options(), &[5.0]);
    }

    #[test]
    fn input_count_is_checked_first() {
        let err = IndicatorKind::Sma.plan(&[10, 10], &[]).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidArity {
                indicator: "sma",
                arity: Arity::Inputs,
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let err = IndicatorKind::Atr.plan(&[10, 10, 9], &opts(&[3.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InconsistentInputLength);
    }

    #[test]
    fn lookback_longer_than_input_is_insufficient() {
        let err = IndicatorKind::Sma.plan(&[4], &opts(&[5.0])).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                indicator: "sma",
                required: 5,
                actual: 4,
            }
        );
    }

    #[test]
    fn exact_lookback_still_produces_one_sample() {
        let plan = IndicatorKind::Sma.plan(&[5], &opts(&[5.0])).unwrap();
        assert_eq!(plan.output_len(), 1);
    }

    #[test]
    fn empty_input_is_insufficient_even_without_lookback() {
        let err = IndicatorKind::Abs.plan(&[0], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }
}
