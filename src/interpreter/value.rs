use serde::{Deserialize, Serialize};
use std::fmt;

/// A single block parameter as typed into the block editor.
///
/// Parameters are kept exactly as authored; numeric interpretation happens
/// lazily in the interpreter so malformed input can be sanitized to defaults
/// instead of being rejected at edit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    /// Numeric literal.
    Number(f64),
    /// Free-form text (message bodies, or numbers still in textual form).
    Text(String),
}

impl Param {
    /// Parse the parameter as a finite number.
    ///
    /// Text is trimmed first and the empty string reads as zero. Values that
    /// do not parse, or parse to NaN/infinity, yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Param::Number(num) => *num,
            Param::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().ok()?
                }
            }
        };
        value.is_finite().then_some(value)
    }

    /// Numeric value, falling back to `default` when unparsable or zero.
    pub fn number_or(&self, default: f64) -> f64 {
        match self.as_number() {
            Some(value) if value != 0.0 => value,
            _ => default,
        }
    }

    /// Text rendering used for speech bubbles; zero and empty text are blank.
    pub fn as_message(&self) -> String {
        match self {
            Param::Number(num) if *num == 0.0 => String::new(),
            other => other.to_string(),
        }
    }

    /// Arithmetic negation where the parameter reads as a number.
    ///
    /// Unparsable text is returned untouched: it sanitizes to zero either way.
    pub fn negated(&self) -> Param {
        match self.as_number() {
            Some(value) => Param::Number(-value),
            None => self.clone(),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Number(f64::from(value))
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Number(num) if num.fract() == 0.0 && num.abs() < 1e15 => {
                write!(f, "{}", *num as i64)
            }
            Param::Number(num) => write!(f, "{}", num),
            Param::Text(text) => write!(f, "{}", text),
        }
    }
}
