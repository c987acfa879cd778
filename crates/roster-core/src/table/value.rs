use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell of a roster table.
///
/// Upstream cleaning hands over loosely typed columns (pandas-style floats for
/// partially filled integer columns, free text, parsed dates), so a cell keeps
/// the type it arrived with until a transform converts it explicitly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// Empty, NaN, and whitespace-only text all count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Float(f) => f.is_nan(),
            Value::Text(s) => s.trim().is_empty(),
            Value::Int(_) | Value::Date(_) => false,
        }
    }

    /// Render the value as text. Missing values render as `""`, integral floats
    /// without a fractional part, dates as `YYYY-MM-DD`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Empty => Cow::Borrowed(""),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) if f.is_nan() => Cow::Borrowed(""),
            Value::Float(f) => match float_to_i64(*f) {
                Some(i) if f.fract() == 0.0 => Cow::Owned(i.to_string()),
                _ => Cow::Owned(f.to_string()),
            },
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Trimmed, lower-cased text used for comparisons and block keys.
    pub fn normalized(&self) -> String {
        self.as_text().trim().to_lowercase()
    }

    /// Integer view: ints, floats (truncated), and numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => float_to_i64(*f),
            Value::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_i64))
            }
            _ => None,
        }
    }

    /// Date view: dates, and text in ISO `YYYY-MM-DD` form.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }
}

/// Truncate `f` to an integer. `None` for NaN, infinities, and values outside
/// the `i64` range, which a plain `as` cast would saturate.
pub(crate) fn float_to_i64(f: f64) -> Option<i64> {
    // 2^63 is exact in f64; i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    (t.is_finite() && t >= -LIMIT && t < LIMIT).then_some(t as i64)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Empty)
    }
}
