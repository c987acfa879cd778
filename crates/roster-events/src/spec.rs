//! Event specs: where an event's date lives and which columns it keeps.

use serde::{Deserialize, Serialize};

/// How the date of an event is read from its source row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DateSource {
    /// `{prefix}_year`, `{prefix}_month`, `{prefix}_day` columns. Only the year
    /// column is required.
    #[default]
    Parts,
    /// A single `{prefix}_date` column parsed with `format`, or with format
    /// inference when `None`.
    Parse { format: Option<String> },
}

/// Extraction rule for one event kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub prefix: String,
    #[serde(default)]
    pub date: DateSource,
    /// Columns carried into the event row. `None` keeps every column.
    #[serde(default)]
    pub keep: Option<Vec<String>>,
}

impl EventSpec {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            date: DateSource::Parts,
            keep: None,
        }
    }

    /// Read the date from `{prefix}_date` instead of component columns.
    pub fn parse_date(mut self, format: Option<&str>) -> Self {
        self.date = DateSource::Parse {
            format: format.map(String::from),
        };
        self
    }

    pub fn keep(mut self, columns: &[&str]) -> Self {
        self.keep = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn year_column(&self) -> String {
        format!("{}_year", self.prefix)
    }

    pub fn month_column(&self) -> String {
        format!("{}_month", self.prefix)
    }

    pub fn day_column(&self) -> String {
        format!("{}_day", self.prefix)
    }

    pub fn date_column(&self) -> String {
        format!("{}_date", self.prefix)
    }

    pub fn time_column(&self) -> String {
        format!("{}_time", self.prefix)
    }
}
