//! The static indicator catalog.
//!
//! Every indicator the engine exposes is listed once in the table at the bottom of this
//! file. The table generates [`IndicatorKind`], one [`IndicatorInfo`] record per variant,
//! and the canonical name lookup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::IndicatorError;

/// Descriptive classification carried by each catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    /// Elementwise vector operation, including the two-series arithmetic `add`, `sub`,
    /// `mul` and `div`.
    Simple,
    /// Derived series on its own scale (oscillators and friends).
    Indicator,
    /// Series plotted on the same scale as price.
    Overlay,
    /// Generic math over a window or across two series.
    Math,
}

impl IndicatorType {
    /// Tag exactly as the engine spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Indicator => "indicator",
            Self::Overlay => "overlay",
            Self::Math => "math",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "indicator" => Ok(Self::Indicator),
            "overlay" => Ok(Self::Overlay),
            "math" => Ok(Self::Math),
            other => Err(format!("unknown indicator type: {other}")),
        }
    }
}

/// Immutable metadata describing one indicator.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct IndicatorInfo {
    /// Catalog entry this record belongs to.
    #[serde(skip)]
    pub kind: IndicatorKind,
    /// Short identifier, e.g. `sma`.
    pub name: &'static str,
    /// Display name, e.g. `Simple Moving Average`.
    pub full_name: &'static str,
    /// Classification tag.
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    /// Number of input series consumed.
    pub inputs: usize,
    /// Number of scalar options accepted.
    pub options: usize,
    /// Number of output series produced.
    pub outputs: usize,
    /// Display names of the input series.
    pub input_names: &'static [&'static str],
    /// Display names of the options.
    pub option_names: &'static [&'static str],
    /// Display names of the output series.
    pub output_names: &'static [&'static str],
}

macro_rules! catalog {
    ($(
        $variant:ident => $name:literal, $full:literal, $ty:ident,
            [$($input:literal),*], [$($option:literal),*], [$($output:literal),*];
    )*) => {
        /// Every indicator known to the engine.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum IndicatorKind {
            $(
                #[doc = $full]
                $variant,
            )*
        }

        static CATALOG: &[IndicatorInfo] = &[
            $(
                IndicatorInfo {
                    kind: IndicatorKind::$variant,
                    name: $name,
                    full_name: $full,
                    indicator_type: IndicatorType::$ty,
                    inputs: <[&str]>::len(&[$($input),*]),
                    options: <[&str]>::len(&[$($option),*]),
                    outputs: <[&str]>::len(&[$($output),*]),
                    input_names: &[$($input),*],
                    option_names: &[$($option),*],
                    output_names: &[$($output),*],
                },
            )*
        ];

        impl IndicatorKind {
            /// All catalog entries in identifier order.
            pub const ALL: &'static [IndicatorKind] = &[$(IndicatorKind::$variant),*];

            /// Canonical short identifier.
            pub fn name(self) -> &'static str {
                match self {
                    $(IndicatorKind::$variant => $name,)*
                }
            }
        }
    };
}

impl IndicatorKind {
    /// Metadata record for this indicator.
    pub fn info(self) -> &'static IndicatorInfo {
        &CATALOG[self as usize]
    }

    /// Resolves an identifier, accepting the legacy misspellings listed in [`ALIASES`].
    ///
    /// Lookup ignores case and surrounding whitespace.
    pub fn find(name: &str) -> Option<Self> {
        BY_NAME.get(normalize_name(name).as_str()).copied()
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::find(name).ok_or_else(|| IndicatorError::UnknownIndicator(name.to_string()))
    }
}

/// Spellings published in the original type declarations that differ from the engine's
/// identifiers.
pub const ALIASES: &[(&str, IndicatorKind)] = &[
    ("asxr", IndicatorKind::Adxr),
    ("arronosc", IndicatorKind::Aroonosc),
    ("avgpice", IndicatorKind::Avgprice),
    ("hama", IndicatorKind::Kama),
    ("utlosc", IndicatorKind::Ultosc),
];

static BY_NAME: Lazy<HashMap<&'static str, IndicatorKind>> = Lazy::new(|| {
    let mut by_name: HashMap<&'static str, IndicatorKind> = IndicatorKind::ALL
        .iter()
        .map(|kind| (kind.name(), *kind))
        .collect();
    for (alias, kind) in ALIASES {
        by_name.entry(*alias).or_insert(*kind);
    }
    by_name
});

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

catalog! {
    Abs => "abs", "Vector Absolute Value", Simple, ["real"], [], ["abs"];
    Acos => "acos", "Vector Arccosine", Simple, ["real"], [], ["acos"];
    Ad => "ad", "Accumulation/Distribution Line", Indicator,
        ["high", "low", "close", "volume"], [], ["ad"];
    Add => "add", "Vector Addition", Simple, ["real", "real"], [], ["add"];
    Adosc => "adosc", "Accumulation/Distribution Oscillator", Indicator,
        ["high", "low", "close", "volume"], ["short period", "long period"], ["adosc"];
    Adx => "adx", "Average Directional Movement Index", Indicator,
        ["high", "low"], ["period"], ["adx"];
    Adxr => "adxr", "Average Directional Movement Rating", Indicator,
        ["high", "low"], ["period"], ["adxr"];
    Ao => "ao", "Awesome Oscillator", Indicator, ["high", "low"], [], ["ao"];
    Apo => "apo", "Absolute Price Oscillator", Indicator,
        ["real"], ["short period", "long period"], ["apo"];
    Aroon => "aroon", "Aroon", Indicator,
        ["high", "low"], ["period"], ["aroon_down", "aroon_up"];
    Aroonosc => "aroonosc", "Aroon Oscillator", Indicator,
        ["high", "low"], ["period"], ["aroonosc"];
    Asin => "asin", "Vector Arcsine", Simple, ["real"], [], ["asin"];
    Atan => "atan", "Vector Arctangent", Simple, ["real"], [], ["atan"];
    Atr => "atr", "Average True Range", Indicator,
        ["high", "low", "close"], ["period"], ["atr"];
    Avgprice => "avgprice", "Average Price", Overlay,
        ["open", "high", "low", "close"], [], ["avgprice"];
    Bbands => "bbands", "Bollinger Bands", Overlay,
        ["real"], ["period", "stddev"], ["bbands_lower", "bbands_middle", "bbands_upper"];
    Bop => "bop", "Balance of Power", Indicator,
        ["open", "high", "low", "close"], [], ["bop"];
    Cci => "cci", "Commodity Channel Index", Indicator,
        ["high", "low", "close"], ["period"], ["cci"];
    Ceil => "ceil", "Vector Ceiling", Simple, ["real"], [], ["ceil"];
    Cmo => "cmo", "Chande Momentum Oscillator", Indicator, ["real"], ["period"], ["cmo"];
    Cos => "cos", "Vector Cosine", Simple, ["real"], [], ["cos"];
    Cosh => "cosh", "Vector Hyperbolic Cosine", Simple, ["real"], [], ["cosh"];
    Crossany => "crossany", "Crossany", Math, ["real", "real"], [], ["crossany"];
    Crossover => "crossover", "Crossover", Math, ["real", "real"], [], ["crossover"];
    Cvi => "cvi", "Chaikins Volatility", Indicator, ["high", "low"], ["period"], ["cvi"];
    Decay => "decay", "Linear Decay", Math, ["real"], ["period"], ["decay"];
    Dema => "dema", "Double Exponential Moving Average", Overlay,
        ["real"], ["period"], ["dema"];
    Di => "di", "Directional Indicator", Indicator,
        ["high", "low", "close"], ["period"], ["plus_di", "minus_di"];
    Div => "div", "Vector Division", Simple, ["real", "real"], [], ["div"];
    Dm => "dm", "Directional Movement", Indicator,
        ["high", "low"], ["period"], ["plus_dm", "minus_dm"];
    Dpo => "dpo", "Detrended Price Oscillator", Indicator, ["real"], ["period"], ["dpo"];
    Dx => "dx", "Directional Movement Index", Indicator, ["high", "low"], ["period"], ["dx"];
    Edecay => "edecay", "Exponential Decay", Math, ["real"], ["period"], ["edecay"];
    Ema => "ema", "Exponential Moving Average", Overlay, ["real"], ["period"], ["ema"];
    Emv => "emv", "Ease of Movement", Indicator, ["high", "low", "volume"], [], ["emv"];
    Exp => "exp", "Vector Exponential", Simple, ["real"], [], ["exp"];
    Fisher => "fisher", "Fisher Transform", Indicator,
        ["high", "low"], ["period"], ["fisher", "fisher_signal"];
    Floor => "floor", "Vector Floor", Simple, ["real"], [], ["floor"];
    Fosc => "fosc", "Forecast Oscillator", Indicator, ["real"], ["period"], ["fosc"];
    Hma => "hma", "Hull Moving Average", Overlay, ["real"], ["period"], ["hma"];
    Kama => "kama", "Kaufman Adaptive Moving Average", Overlay,
        ["real"], ["period"], ["kama"];
    Kvo => "kvo", "Klinger Volume Oscillator", Indicator,
        ["high", "low", "close", "volume"], ["short period", "long period"], ["kvo"];
    Lag => "lag", "Lag", Math, ["real"], ["period"], ["lag"];
    Linreg => "linreg", "Linear Regression", Overlay, ["real"], ["period"], ["linreg"];
    Linregintercept => "linregintercept", "Linear Regression Intercept", Indicator,
        ["real"], ["period"], ["linregintercept"];
    Linregslope => "linregslope", "Linear Regression Slope", Indicator,
        ["real"], ["period"], ["linregslope"];
    Ln => "ln", "Vector Natural Log", Simple, ["real"], [], ["ln"];
    Log10 => "log10", "Vector Base-10 Log", Simple, ["real"], [], ["log10"];
    Macd => "macd", "Moving Average Convergence/Divergence", Indicator,
        ["real"], ["short period", "long period", "signal period"],
        ["macd", "macd_signal", "macd_histogram"];
    Marketfi => "marketfi", "Market Facilitation Index", Indicator,
        ["high", "low", "volume"], [], ["marketfi"];
    Mass => "mass", "Mass Index", Indicator, ["high", "low"], ["period"], ["mass"];
    Max => "max", "Maximum In Period", Math, ["real"], ["period"], ["max"];
    Md => "md", "Mean Deviation Over Period", Math, ["real"], ["period"], ["md"];
    Medprice => "medprice", "Median Price", Overlay, ["high", "low"], [], ["medprice"];
    Mfi => "mfi", "Money Flow Index", Indicator,
        ["high", "low", "close", "volume"], ["period"], ["mfi"];
    Min => "min", "Minimum In Period", Math, ["real"], ["period"], ["min"];
    Mom => "mom", "Momentum", Indicator, ["real"], ["period"], ["mom"];
    Msw => "msw", "Mesa Sine Wave", Indicator,
        ["real"], ["period"], ["msw_sine", "msw_lead"];
    Mul => "mul", "Vector Multiplication", Simple, ["real", "real"], [], ["mul"];
    Natr => "natr", "Normalized Average True Range", Indicator,
        ["high", "low", "close"], ["period"], ["natr"];
    Nvi => "nvi", "Negative Volume Index", Indicator, ["close", "volume"], [], ["nvi"];
    Obv => "obv", "On Balance Volume", Indicator, ["close", "volume"], [], ["obv"];
    Ppo => "ppo", "Percentage Price Oscillator", Indicator,
        ["real"], ["short period", "long period"], ["ppo"];
    Psar => "psar", "Parabolic SAR", Overlay,
        ["high", "low"], ["acceleration factor step", "acceleration factor maximum"], ["psar"];
    Pvi => "pvi", "Positive Volume Index", Indicator, ["close", "volume"], [], ["pvi"];
    Qstick => "qstick", "Qstick", Indicator, ["open", "close"], ["period"], ["qstick"];
    Roc => "roc", "Rate of Change", Indicator, ["real"], ["period"], ["roc"];
    Rocr => "rocr", "Rate of Change Ratio", Indicator, ["real"], ["period"], ["rocr"];
    Round => "round", "Vector Round", Simple, ["real"], [], ["round"];
    Rsi => "rsi", "Relative Strength Index", Indicator, ["real"], ["period"], ["rsi"];
    Sin => "sin", "Vector Sine", Simple, ["real"], [], ["sin"];
    Sinh => "sinh", "Vector Hyperbolic Sine", Simple, ["real"], [], ["sinh"];
    Sma => "sma", "Simple Moving Average", Overlay, ["real"], ["period"], ["sma"];
    Sqrt => "sqrt", "Vector Square Root", Simple, ["real"], [], ["sqrt"];
    Stddev => "stddev", "Standard Deviation Over Period", Math,
        ["real"], ["period"], ["stddev"];
    Stderr => "stderr", "Standard Error Over Period", Math, ["real"], ["period"], ["stderr"];
    Stoch => "stoch", "Stochastic Oscillator", Indicator,
        ["high", "low", "close"], ["%k period", "%k slowing period", "%d period"],
        ["stoch_k", "stoch_d"];
    Stochrsi => "stochrsi", "Stochastic RSI", Indicator, ["real"], ["period"], ["stochrsi"];
    Sub => "sub", "Vector Subtraction", Simple, ["real", "real"], [], ["sub"];
    Sum => "sum", "Sum Over Period", Math, ["real"], ["period"], ["sum"];
    Tan => "tan", "Vector Tangent", Simple, ["real"], [], ["tan"];
    Tanh => "tanh", "Vector Hyperbolic Tangent", Simple, ["real"], [], ["tanh"];
    Tema => "tema", "Triple Exponential Moving Average", Overlay,
        ["real"], ["period"], ["tema"];
    Todeg => "todeg", "Vector Degree Conversion", Simple, ["real"], [], ["degrees"];
    Torad => "torad", "Vector Radian Conversion", Simple, ["real"], [], ["radians"];
    Tr => "tr", "True Range", Indicator, ["high", "low", "close"], [], ["tr"];
    Trima => "trima", "Triangular Moving Average", Overlay, ["real"], ["period"], ["trima"];
    Trix => "trix", "Trix", Indicator, ["real"], ["period"], ["trix"];
    Trunc => "trunc", "Vector Truncate", Simple, ["real"], [], ["trunc"];
    Tsf => "tsf", "Time Series Forecast", Overlay, ["real"], ["period"], ["tsf"];
    Typprice => "typprice", "Typical Price", Overlay,
        ["high", "low", "close"], [], ["typprice"];
    Ultosc => "ultosc", "Ultimate Oscillator", Indicator,
        ["high", "low", "close"], ["short period", "medium period", "long period"], ["ultosc"];
    Var => "var", "Variance Over Period", Math, ["real"], ["period"], ["var"];
    Vhf => "vhf", "Vertical Horizontal Filter", Indicator, ["real"], ["period"], ["vhf"];
    Vidya => "vidya", "Variable Index Dynamic Average", Overlay,
        ["real"], ["short period", "long period", "alpha"], ["vidya"];
    Volatility => "volatility", "Annualized Historical Volatility", Indicator,
        ["real"], ["period"], ["volatility"];
    Vosc => "vosc", "Volume Oscillator", Indicator,
        ["volume"], ["short period", "long period"], ["vosc"];
    Vwma => "vwma", "Volume Weighted Moving Average", Overlay,
        ["close", "volume"], ["period"], ["vwma"];
    Wad => "wad", "Williams Accumulation/Distribution", Indicator,
        ["high", "low", "close"], [], ["wad"];
    Wcprice => "wcprice", "Weighted Close Price", Overlay,
        ["high", "low", "close"], [], ["wcprice"];
    Wilders => "wilders", "Wilders Smoothing", Overlay, ["real"], ["period"], ["wilders"];
    Willr => "willr", "Williams %R", Indicator,
        ["high", "low", "close"], ["period"], ["willr"];
    Wma => "wma", "Weighted Moving Average", Overlay, ["real"], ["period"], ["wma"];
    Zlema => "zlema", "Zero-Lag Exponential Moving Average", Overlay,
        ["real"], ["period"], ["zlema"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_every_engine_indicator() {
        assert_eq!(IndicatorKind::ALL.len(), 104);
        assert_eq!(CATALOG.len(), IndicatorKind::ALL.len());
    }

    #[test]
    fn records_are_indexed_by_variant() {
        for kind in IndicatorKind::ALL {
            let info = kind.info();
            assert_eq!(info.kind, *kind);
            assert_eq!(info.name, kind.name());
        }
    }

    #[test]
    fn name_lists_match_declared_counts() {
        for kind in IndicatorKind::ALL {
            let info = kind.info();
            assert_eq!(info.input_names.len(), info.inputs, "{}", info.name);
            assert_eq!(info.option_names.len(), info.options, "{}", info.name);
            assert_eq!(info.output_names.len(), info.outputs, "{}", info.name);
            assert!(info.inputs > 0, "{}", info.name);
            assert!(info.outputs > 0, "{}", info.name);
        }
    }

    #[test]
    fn identifiers_are_sorted_and_unique() {
        let names: Vec<&str> = IndicatorKind::ALL.iter().map(|kind| kind.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn sma_shape() {
        let info = IndicatorKind::Sma.info();
        assert_eq!(info.indicator_type, IndicatorType::Overlay);
        assert_eq!((info.inputs, info.options, info.outputs), (1, 1, 1));
        assert_eq!(info.option_names, &["period"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(IndicatorKind::find(" RSI "), Some(IndicatorKind::Rsi));
        assert_eq!("Macd".parse::<IndicatorKind>().unwrap(), IndicatorKind::Macd);
    }

    #[test]
    fn legacy_spellings_resolve_to_engine_identifiers() {
        for (alias, kind) in ALIASES {
            assert_eq!(IndicatorKind::find(alias), Some(*kind));
            assert_ne!(*alias, kind.name());
        }
    }

    #[test]
    fn unknown_identifier_is_reported() {
        let err = "notreal".parse::<IndicatorKind>().unwrap_err();
        assert_eq!(err, IndicatorError::UnknownIndicator("notreal".into()));
    }

    #[test]
    fn serializes_with_engine_field_names() {
        let value = serde_json::to_value(IndicatorKind::Bbands.info()).unwrap();
        assert_eq!(value["type"], "overlay");
        assert_eq!(value["outputs"], 3);
        assert_eq!(value["output_names"][2], "bbands_upper");
        assert!(value.get("kind").is_none());
    }
}
