//! Date parsing helpers for event extraction.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::table::Value;

/// Formats tried, in order, when a spec asks for date inference.
pub const INFERRED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%Y%m%d", "%m-%d-%Y"];

/// Formats tried for values carrying a time component.
const INFERRED_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Year/month/day components of an event date. Any component may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateParts {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
}

impl DateParts {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year() as i64),
            month: Some(date.month() as i64),
            day: Some(date.day() as i64),
        }
    }

    /// True when no component is known.
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    pub fn to_values(self) -> [Value; 3] {
        [self.year.into(), self.month.into(), self.day.into()]
    }
}

/// Parse a cell into a date. `format` pins a single chrono format; `None`
/// tries [`INFERRED_DATE_FORMATS`] and a few date-time layouts.
pub fn parse_date(value: &Value, format: Option<&str>) -> Option<NaiveDate> {
    if let Value::Date(date) = value {
        return Some(*date);
    }
    if value.is_missing() {
        return None;
    }
    let text = value.as_text();
    let text = text.trim();
    match format {
        Some(fmt) => NaiveDate::parse_from_str(text, fmt)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(text, fmt).ok().map(|dt| dt.date())),
        None => INFERRED_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
            .or_else(|| {
                INFERRED_DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                    .map(|dt| dt.date())
            }),
    }
}
