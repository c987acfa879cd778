//! EventBuilder: accumulates event frames and finalizes them into one log.

use std::collections::BTreeMap;

use roster_core::columns::{EVENT_FIXED_COLUMNS, EVENT_NUMERIC_COLUMNS};
use roster_core::config::EventsConfig;
use roster_core::constants::{AGENCY_COLUMN, UID_COLUMN};
use roster_core::dates::{parse_date, DateParts};
use roster_core::errors::{EventError, RosterResult};
use roster_core::table::{float_to_int_str, set_values, Row, Table, Value};
use roster_core::{uid, DataQualityWarning, EventKind};
use roster_observability::extract_span;

use crate::spec::{DateSource, EventSpec};

const TIME_COLUMN: &str = "time";

/// Columns the builder writes itself; source columns with these names are not kept.
const GENERATED_COLUMNS: &[&str] = &["event_uid", "kind", "year", "month", "day", TIME_COLUMN];

/// Collects event frames extracted from source tables.
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    config: EventsConfig,
    frames: Vec<Table>,
    warnings: Vec<DataQualityWarning>,
}

impl EventBuilder {
    pub fn new(config: EventsConfig) -> Self {
        Self {
            config,
            frames: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Extract events of every `(kind, spec)` from `source` using the configured
    /// duplicate-key warning setting.
    pub fn extract(
        &mut self,
        source: &Table,
        specs: &[(EventKind, EventSpec)],
        key_columns: &[&str],
    ) -> RosterResult<()> {
        let warn = self.config.warn_on_duplicate_keys;
        self.extract_with(source, specs, key_columns, warn)
    }

    /// Extract events of every `(kind, spec)` from `source`.
    ///
    /// The event uid of a row is the hash of the kind tag and the row's
    /// `key_columns` values. Rows without a year produce no event.
    /// Every spec is checked against `source` before any frame is added, so a
    /// failed call leaves the builder unchanged.
    pub fn extract_with(
        &mut self,
        source: &Table,
        specs: &[(EventKind, EventSpec)],
        key_columns: &[&str],
        warn_on_duplicate_keys: bool,
    ) -> RosterResult<()> {
        if key_columns.is_empty() {
            return Err(EventError::EmptyKey.into());
        }
        if let Some(missing) = key_columns.iter().find(|c| !source.has_column(c)) {
            return Err(EventError::MissingKeyColumn {
                column: missing.to_string(),
            }
            .into());
        }
        for (kind, spec) in specs {
            self.check_spec(source, *kind, spec)?;
        }

        let mut frames = Vec::with_capacity(specs.len());
        let mut warnings = Vec::new();
        for (kind, spec) in specs {
            let span = extract_span!(kind, source.len());
            let _guard = span.enter();
            let (frame, duplicates) = self.extract_one(source, *kind, spec, key_columns)?;
            if warn_on_duplicate_keys {
                for warning in duplicates {
                    tracing::warn!(%warning, "duplicate event key");
                    warnings.push(warning);
                }
            }
            tracing::debug!(events = frame.len(), "extracted events");
            frames.push(frame);
        }
        self.frames.extend(frames);
        self.warnings.extend(warnings);
        Ok(())
    }

    fn check_spec(&self, source: &Table, kind: EventKind, spec: &EventSpec) -> Result<(), EventError> {
        let date_column = match spec.date {
            DateSource::Parts => spec.year_column(),
            DateSource::Parse { .. } => spec.date_column(),
        };
        if !source.has_column(&date_column) {
            return Err(EventError::MissingDateColumns {
                kind,
                prefix: spec.prefix.clone(),
            });
        }
        if let Some(keep) = &spec.keep {
            if let Some(missing) = keep.iter().find(|c| !source.has_column(c)) {
                return Err(EventError::MissingKeepColumn {
                    kind,
                    column: missing.clone(),
                });
            }
        }
        Ok(())
    }

    fn date_parts(&self, row: Row<'_>, spec: &EventSpec) -> DateParts {
        match &spec.date {
            DateSource::Parts => DateParts {
                year: row.get(&spec.year_column()).as_i64(),
                month: row.get(&spec.month_column()).as_i64(),
                day: row.get(&spec.day_column()).as_i64(),
            },
            DateSource::Parse { format } => {
                let format = format
                    .as_deref()
                    .or(self.config.default_date_format.as_deref());
                parse_date(row.get(&spec.date_column()), format)
                    .map(DateParts::from_date)
                    .unwrap_or_default()
            }
        }
    }

    fn extract_one(
        &self,
        source: &Table,
        kind: EventKind,
        spec: &EventSpec,
        key_columns: &[&str],
    ) -> RosterResult<(Table, Vec<DataQualityWarning>)> {
        let kept: Vec<String> = kept_columns(source, spec);
        let time_column = spec.time_column();
        let has_time = source.has_column(&time_column);

        let mut columns: Vec<String> = GENERATED_COLUMNS[..5].iter().map(|c| c.to_string()).collect();
        if has_time {
            columns.push(TIME_COLUMN.to_string());
        }
        columns.extend(kept.iter().cloned());

        let mut frame = Table::new(columns);
        let mut by_uid: BTreeMap<String, Vec<(usize, String)>> = BTreeMap::new();
        for row in source.rows() {
            let parts = self.date_parts(row, spec);
            if parts.year.is_none() {
                continue;
            }
            let key: Vec<String> = std::iter::once(kind.as_str().to_string())
                .chain(key_columns.iter().map(|c| row.get(c).normalized()))
                .collect();
            let event_uid = uid(&key);

            let [year, month, day] = parts.to_values();
            let mut values = vec![
                Value::text(event_uid.as_str()),
                Value::text(kind.as_str()),
                year,
                month,
                day,
            ];
            if has_time {
                values.push(row.get(&time_column).clone());
            }
            values.extend(kept.iter().map(|c| row.get(c).clone()));

            by_uid
                .entry(event_uid)
                .or_default()
                .push((row.index(), payload_key(&values)));
            frame.push_row(values)?;
        }

        let duplicates = by_uid
            .into_iter()
            .filter(|(_, rows)| rows.iter().any(|(_, payload)| *payload != rows[0].1))
            .map(|(event_uid, rows)| DataQualityWarning::DuplicateEventKey {
                kind,
                event_uid,
                rows: rows.into_iter().map(|(index, _)| index).collect(),
            })
            .collect();
        Ok((frame, duplicates))
    }

    /// Number of frames extracted so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Duplicate-key warnings raised by extractions that enabled them.
    pub fn warnings(&self) -> &[DataQualityWarning] {
        &self.warnings
    }

    /// One event log from every frame, deduplicated per the config.
    pub fn finalize(&self) -> Table {
        self.finalize_with(self.config.drop_duplicates)
    }

    /// One event log from every frame.
    ///
    /// Fixed event columns lead, followed by kept columns in order of first
    /// appearance. Numeric columns become integer strings and rows are sorted by
    /// (agency, kind, event_uid).
    pub fn finalize_with(&self, drop_duplicates: bool) -> Table {
        let mut combined = Table::concat(&self.frames);
        for fixed in EVENT_FIXED_COLUMNS {
            if !combined.has_column(fixed) {
                combined = set_values(&combined, &[(*fixed, Value::Empty)]);
            }
        }
        let mut order: Vec<&str> = EVENT_FIXED_COLUMNS.to_vec();
        if combined.has_column(TIME_COLUMN) {
            order.push(TIME_COLUMN);
        }
        for column in combined.columns() {
            if !order.contains(&column.as_str()) {
                order.push(column.as_str());
            }
        }
        let log = combined.select_existing(&order);
        let log = if drop_duplicates { log.drop_duplicates() } else { log };
        float_to_int_str(&log, EVENT_NUMERIC_COLUMNS).sort_by(&[AGENCY_COLUMN, "kind", "event_uid"])
    }
}

/// Columns carried into the event rows: the spec's keep list (or every column),
/// always including `uid` and `agency` when the source has them.
fn kept_columns(source: &Table, spec: &EventSpec) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    for fixed in [UID_COLUMN, AGENCY_COLUMN] {
        if source.has_column(fixed) {
            kept.push(fixed.to_string());
        }
    }
    let candidates: Vec<String> = match &spec.keep {
        Some(keep) => keep.clone(),
        None => source.columns().to_vec(),
    };
    for column in candidates {
        if !GENERATED_COLUMNS.contains(&column.as_str()) && !kept.contains(&column) {
            kept.push(column);
        }
    }
    kept
}

fn payload_key(values: &[Value]) -> String {
    // Skip event_uid and kind, which are equal by construction within a group.
    values[2..]
        .iter()
        .map(|v| v.as_text().into_owned())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}
