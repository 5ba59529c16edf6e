//! Start-index (lookback) formulas.
//!
//! Option values are truncated toward zero before use, matching how the engine casts its
//! `double` options to `int`. The formulas depend on option values only and never on input
//! data.

use crate::catalog::IndicatorKind;
use crate::error::{Arity, IndicatorError, IndicatorResult};
use crate::options::OptionValue;

impl IndicatorKind {
    /// Index into the input series of the first output sample.
    ///
    /// `sma` with a period of 5 starts at input index 4.
    pub fn start_index(self, options: &[OptionValue]) -> IndicatorResult<usize> {
        let values = self.resolve_options(options)?;
        self.start_for(&values)
    }

    /// Validates the option count and converts each option to the engine's numeric form.
    pub fn resolve_options(self, options: &[OptionValue]) -> IndicatorResult<Vec<f64>> {
        let info = self.info();
        check_option_count(self, options.len())?;
        options
            .iter()
            .zip(info.option_names)
            .map(|(value, option)| {
                value
                    .to_f64()
                    .map_err(|reason| IndicatorError::invalid_option(info.name, option, reason))
            })
            .collect()
    }

    /// Start index for options that were already converted with [`Self::resolve_options`].
    pub fn start_for(self, options: &[f64]) -> IndicatorResult<usize> {
        check_option_count(self, options.len())?;
        let raw = self.raw_start(options);
        usize::try_from(raw).map_err(|_| {
            let info = self.info();
            let option = info
                .option_names
                .get(self.governing_option())
                .copied()
                .unwrap_or_default();
            IndicatorError::invalid_option(
                info.name,
                option,
                format!("lookback evaluates to {raw}"),
            )
        })
    }

    fn raw_start(self, options: &[f64]) -> i64 {
        use IndicatorKind::*;

        let opt = |index: usize| options[index] as i64;
        match self {
            Abs | Acos | Ad | Add | Asin | Atan | Avgprice | Bop | Ceil | Cos | Cosh | Decay
            | Div | Edecay | Ema | Exp | Floor | Ln | Log10 | Marketfi | Medprice | Mul | Nvi
            | Obv | Pvi | Round | Sin | Sinh | Sqrt | Sub | Tan | Tanh | Todeg | Torad | Tr
            | Trunc | Typprice | Wcprice => 0,
            Apo | Crossany | Crossover | Emv | Kvo | Ppo | Psar | Wad => 1,
            Ao => 33,
            Atr | Bbands | Di | Dm | Dpo | Dx | Fisher | Kama | Linreg | Linregintercept
            | Linregslope | Max | Md | Min | Natr | Qstick | Sma | Stddev | Stderr | Sum
            | Trima | Tsf | Var | Vwma | Wilders | Willr | Wma => opt(0).saturating_sub(1),
            Aroon | Aroonosc | Cmo | Fosc | Lag | Mfi | Mom | Msw | Roc | Rocr | Rsi | Vhf
            | Volatility => opt(0),
            Adx | Cci | Dema => opt(0).saturating_sub(1).saturating_mul(2),
            Adxr | Tema => opt(0).saturating_sub(1).saturating_mul(3),
            Trix => opt(0).saturating_sub(1).saturating_mul(3).saturating_add(1),
            Cvi | Stochrsi => opt(0).saturating_mul(2).saturating_sub(1),
            Hma => {
                let period = opt(0);
                let root = (period.max(0) as f64).sqrt() as i64;
                period.saturating_add(root).saturating_sub(2)
            }
            Zlema => opt(0).saturating_sub(1) / 2,
            Mass => opt(0).saturating_add(15),
            Adosc | Macd | Vosc => opt(1).saturating_sub(1),
            Vidya => opt(1).saturating_sub(2),
            Ultosc => opt(2),
            Stoch => opt(0)
                .saturating_add(opt(1))
                .saturating_add(opt(2))
                .saturating_sub(3),
        }
    }

    // Option blamed when the lookback comes out negative.
    fn governing_option(self) -> usize {
        match self {
            IndicatorKind::Adosc
            | IndicatorKind::Macd
            | IndicatorKind::Vosc
            | IndicatorKind::Vidya => 1,
            IndicatorKind::Ultosc => 2,
            _ => 0,
        }
    }
}

fn check_option_count(kind: IndicatorKind, actual: usize) -> IndicatorResult<()> {
    let info = kind.info();
    if actual != info.options {
        return Err(IndicatorError::InvalidArity {
            indicator: info.name,
            arity: Arity::Options,
            expected: info.options,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn start(kind: IndicatorKind, options: &[f64]) -> usize {
        kind.start_for(options).unwrap()
    }

    #[test]
    fn sma_period_five_starts_at_four() {
        assert_eq!(
            IndicatorKind::Sma
                .start_index(&[OptionValue::from(5)])
                .unwrap(),
            4
        );
    }

    #[test]
    fn multi_option_formulas() {
        assert_eq!(start(IndicatorKind::Macd, &[12.0, 26.0, 9.0]), 25);
        assert_eq!(start(IndicatorKind::Stoch, &[14.0, 3.0, 3.0]), 17);
        assert_eq!(start(IndicatorKind::Ultosc, &[7.0, 14.0, 28.0]), 28);
        assert_eq!(start(IndicatorKind::Vidya, &[2.0, 5.0, 0.2]), 3);
        assert_eq!(start(IndicatorKind::Bbands, &[20.0, 2.0]), 19);
        assert_eq!(start(IndicatorKind::Psar, &[0.02, 0.2]), 1);
    }

    #[test]
    fn smoothing_chains_compound() {
        assert_eq!(start(IndicatorKind::Dema, &[5.0]), 8);
        assert_eq!(start(IndicatorKind::Tema, &[5.0]), 12);
        assert_eq!(start(IndicatorKind::Trix, &[5.0]), 13);
        assert_eq!(start(IndicatorKind::Adx, &[14.0]), 26);
        assert_eq!(start(IndicatorKind::Adxr, &[14.0]), 39);
    }

    #[test]
    fn irregular_formulas() {
        assert_eq!(start(IndicatorKind::Hma, &[16.0]), 18);
        assert_eq!(start(IndicatorKind::Hma, &[5.0]), 5);
        assert_eq!(start(IndicatorKind::Zlema, &[10.0]), 4);
        assert_eq!(start(IndicatorKind::Mass, &[9.0]), 24);
        assert_eq!(start(IndicatorKind::Ao, &[]), 33);
        assert_eq!(start(IndicatorKind::Stochrsi, &[14.0]), 27);
    }

    #[test]
    fn options_are_truncated_like_the_engine() {
        assert_eq!(start(IndicatorKind::Sma, &[5.9]), 4);
        assert_eq!(
            IndicatorKind::Rsi
                .start_index(&[OptionValue::from("14.7")])
                .unwrap(),
            14
        );
    }

    #[test]
    fn negative_lookback_is_an_invalid_option() {
        let err = IndicatorKind::Sma.start_for(&[0.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOption);

        let err = IndicatorKind::Macd.start_for(&[12.0, 0.0, 9.0]).unwrap_err();
        match err {
            IndicatorError::InvalidOption { option, .. } => assert_eq!(option, "long period"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn option_count_is_checked() {
        let err = IndicatorKind::Sma
            .start_index(&[OptionValue::from(5), OptionValue::from(6)])
            .unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidArity {
                indicator: "sma",
                arity: Arity::Options,
                expected: 1,
                actual: 2,
            }
        );
    }

    #[test]
    fn non_numeric_option_is_rejected() {
        let err = IndicatorKind::Ema
            .start_index(&[OptionValue::from("slow")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOption);
    }

    #[test]
    fn deterministic_for_every_indicator() {
        for kind in IndicatorKind::ALL {
            let options = vec![OptionValue::from(10); kind.info().options];
            let first = kind.start_index(&options);
            let second = kind.start_index(&options);
            assert_eq!(first, second, "{kind}");
            assert!(first.is_ok(), "{kind}");
        }
    }
}
