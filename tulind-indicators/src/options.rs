//! Scalar option values accepted by evaluators and start-index functions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single indicator option: either a number or a textual number.
///
/// Text is accepted for parity with callers that pass options as strings; it is parsed
/// into a number before any computation happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Numeric option.
    Number(f64),
    /// Textual option, parsed as a decimal number.
    Text(String),
}

impl OptionValue {
    /// Converts the option into a finite `f64`.
    ///
    /// Returns a human readable reason when the value is not numeric or not finite.
    pub fn to_f64(&self) -> Result<f64, String> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("`{text}` is not a number"))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("{value} is not finite"))
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::OptionValue;

    #[test]
    fn numeric_text_is_accepted() {
        assert_eq!(OptionValue::from(" 14 ").to_f64(), Ok(14.0));
        assert_eq!(OptionValue::from("0.02").to_f64(), Ok(0.02));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        assert!(OptionValue::from("fast").to_f64().is_err());
        assert!(OptionValue::from("NaN").to_f64().is_err());
        assert!(OptionValue::from(f64::INFINITY).to_f64().is_err());
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let values: Vec<OptionValue> = serde_json::from_str(r#"[5, "2.5"]"#).unwrap();
        assert_eq!(
            values,
            vec![OptionValue::Number(5.0), OptionValue::Text("2.5".into())]
        );
    }
}
