//! Typed values decoded from transaction fields.
//!
//! The union is closed: every decoded value is exactly one of
//! string, integer, float or boolean. Coercion is purely lexical.

use serde::Serialize;
use std::fmt;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Anything that is not a boolean literal or a strict number.
    String(String),
    /// Number without a decimal point.
    Integer(i64),
    /// Number with exactly one decimal point.
    Float(f64),
    /// `true` / `false` in any casing.
    Boolean(bool),
}

impl FieldValue {
    /// Coerce an already-normalized textual value.
    ///
    /// Boolean literals are matched case-insensitively. Values matching the
    /// numeric grammar become `Float` when they contain a `.` and `Integer`
    /// otherwise. Anything else, including numbers that overflow `i64`,
    /// stays a `String`.
    ///
    /// # Examples
    ///
    /// ```
    /// use txnlog::model::FieldValue;
    ///
    /// assert_eq!(FieldValue::coerce("TRUE"), FieldValue::Boolean(true));
    /// assert_eq!(FieldValue::coerce("-12.50"), FieldValue::Float(-12.5));
    /// assert_eq!(FieldValue::coerce("42"), FieldValue::Integer(42));
    /// assert_eq!(FieldValue::coerce("1.2.3"), FieldValue::String("1.2.3".into()));
    /// ```
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return FieldValue::Boolean(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return FieldValue::Boolean(false);
        }

        match NumericShape::of(raw) {
            Some(NumericShape::Integer) => raw
                .parse::<i64>()
                .map(FieldValue::Integer)
                .unwrap_or_else(|_| FieldValue::String(raw.to_string())),
            Some(NumericShape::Float) => raw
                .parse::<f64>()
                .map(FieldValue::Float)
                .unwrap_or_else(|_| FieldValue::String(raw.to_string())),
            None => FieldValue::String(raw.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            // Keep the `.` so the text decodes back to a float
            FieldValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// Lexical classification against `-?[0-9.]+` with at most one `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericShape {
    Integer,
    Float,
}

impl NumericShape {
    fn of(raw: &str) -> Option<Self> {
        let body = raw.strip_prefix('-').unwrap_or(raw);

        let mut digits = 0usize;
        let mut dots = 0usize;
        for b in body.bytes() {
            match b {
                b'0'..=b'9' => digits += 1,
                b'.' => dots += 1,
                _ => return None,
            }
        }

        match (digits, dots) {
            (0, _) => None,
            (_, 0) => Some(NumericShape::Integer),
            (_, 1) => Some(NumericShape::Float),
            _ => None,
        }
    }
}
