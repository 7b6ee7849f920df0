//! Spreadsheet cell values and their text coercion.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Magnitude from which `f64` can no longer hold every integer (2^53).
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// A single spreadsheet cell of mixed primitive type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// No value.
    #[default]
    Empty,
    /// Free text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Date and time without a zone.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Creates a text cell, treating an empty string as [`CellValue::Empty`].
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        let text = value.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    /// Returns `true` for cells that carry no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Coerces the cell to the text stored for tasks and shown in previews.
    ///
    /// Empty cells become `""`. Floats without a fractional part lose their
    /// decimal point so `42.0` reads as `42` and `-0.0` reads as `0`. Floats
    /// past the exactly representable integer range use exponent notation.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Returns the coerced text, or `None` when it would be empty.
    #[must_use]
    pub fn non_empty_text(&self) -> Option<String> {
        Some(self.as_text()).filter(|text| !text.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) if *value == 0.0 => f.write_str("0"),
            Self::Float(value) if value.abs() >= EXACT_INTEGER_LIMIT && value.is_finite() => {
                write!(f, "{value:e}")
            }
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.0}")
            }
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
