//! Uniqueness and cross-table consistency checks.

use std::collections::{BTreeMap, BTreeSet};

use roster_core::constants::AGENCY_COLUMN;
use roster_core::errors::TableError;
use roster_core::table::Table;
use roster_core::DataQualityWarning;

/// Values of `column` that occur on more than one row, sorted. Missing values
/// are not counted.
pub fn ensure_uid_unique(table: &Table, column: &str) -> Result<Vec<String>, TableError> {
    table.require_columns(&[column], "uniqueness check")?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in table.rows() {
        let value = row.get(column);
        if !value.is_missing() {
            *counts.entry(value.as_text().trim().to_string()).or_default() += 1;
        }
    }
    let duplicated: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(v, _)| v)
        .collect();
    if !duplicated.is_empty() {
        let warning = DataQualityWarning::DuplicateKey {
            column: column.to_string(),
            values: duplicated.clone(),
        };
        tracing::warn!(%warning, "key column is not unique");
    }
    Ok(duplicated)
}

/// Like [`ensure_uid_unique`] but fails on the first duplicated value set.
pub fn require_unique(table: &Table, column: &str) -> Result<(), TableError> {
    let values = ensure_uid_unique(table, column)?;
    if values.is_empty() {
        Ok(())
    } else {
        Err(TableError::DuplicateKey {
            column: column.to_string(),
            values,
        })
    }
}

/// Agencies that appear in `other` but not in `personnel`, one warning each,
/// sorted by agency.
pub fn agency_subset_warnings(
    personnel: &Table,
    other: &Table,
) -> Result<Vec<DataQualityWarning>, TableError> {
    personnel.require_columns(&[AGENCY_COLUMN], "personnel")?;
    other.require_columns(&[AGENCY_COLUMN], "agency subset check")?;
    let known: BTreeSet<String> = personnel
        .rows()
        .map(|row| row.get(AGENCY_COLUMN).normalized())
        .collect();
    let unknown: BTreeSet<String> = other
        .rows()
        .map(|row| row.get(AGENCY_COLUMN).normalized())
        .filter(|agency| !agency.is_empty() && !known.contains(agency))
        .collect();
    Ok(unknown
        .into_iter()
        .map(|agency| DataQualityWarning::UnknownAgency { agency })
        .collect())
}
