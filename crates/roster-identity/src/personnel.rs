//! Personnel fusion: one row per officer uid across every source roster.

use std::collections::HashMap;

use roster_core::columns::rearrange_personnel_columns;
use roster_core::constants::UID_COLUMN;
use roster_core::errors::TableError;
use roster_core::table::{Table, Value};

/// Merge personnel rows from `sources` into one row per uid.
///
/// Sources are read in order, and within each source row by row. For every
/// column the first non-missing value seen for a uid wins, so earlier sources
/// take precedence and later ones only fill gaps. Rows without a uid are
/// dropped. The result goes through [`rearrange_personnel_columns`].
pub fn fuse_personnel(sources: &[Table]) -> Result<Table, TableError> {
    for (index, source) in sources.iter().enumerate() {
        source.require_columns(&[UID_COLUMN], &format!("personnel source {index}"))?;
    }
    let combined = Table::concat(sources);
    let Some(uid_col) = combined.column_index(UID_COLUMN) else {
        return Ok(rearrange_personnel_columns(&combined));
    };

    let mut position: HashMap<String, usize> = HashMap::new();
    let mut fused: Vec<Vec<Value>> = Vec::new();
    for row in combined.rows() {
        let uid = &row.values()[uid_col];
        if uid.is_missing() {
            continue;
        }
        let key = uid.as_text().trim().to_string();
        match position.get(&key) {
            Some(&at) => {
                for (slot, value) in fused[at].iter_mut().zip(row.values()) {
                    if slot.is_missing() && !value.is_missing() {
                        *slot = value.clone();
                    }
                }
            }
            None => {
                position.insert(key, fused.len());
                fused.push(row.values().to_vec());
            }
        }
    }
    tracing::debug!(
        sources = sources.len(),
        rows = combined.len(),
        officers = fused.len(),
        "fused personnel"
    );
    let table = Table::from_rows(combined.columns().to_vec(), fused)?;
    Ok(rearrange_personnel_columns(&table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_sources_win_and_later_ones_fill_gaps() {
        let ipm = Table::from_rows(
            ["uid", "first_name", "last_name", "birth_year", "agency"],
            vec![
                vec!["u1".into(), "patrick".into(), "peterman".into(), Value::Float(f64::NAN), "new orleans pd".into()],
                vec!["u2".into(), "thomas".into(), "".into(), Value::Float(1971.0), "new orleans pd".into()],
            ],
        )
        .unwrap();
        let csd = Table::from_rows(
            ["uid", "first_name", "last_name", "birth_year", "race"],
            vec![
                vec!["u1".into(), "pat".into(), "peterman".into(), Value::Float(1968.0), "white".into()],
                vec!["u2".into(), "tom".into(), "ferguson".into(), Value::Float(1970.0), Value::Empty],
                vec!["u3".into(), "arthur".into(), "schopenhaur".into(), Value::Empty, "black".into()],
                vec![Value::Empty, "ghost".into(), "row".into(), Value::Empty, Value::Empty],
            ],
        )
        .unwrap();

        let out = fuse_personnel(&[ipm, csd]).unwrap();
        assert_eq!(out.len(), 3);
        let u1 = out.rows().find(|r| r.text("uid") == "u1").unwrap();
        assert_eq!(u1.text("first_name"), "Patrick");
        assert_eq!(u1.text("birth_year"), "1968");
        assert_eq!(u1.text("race"), "white");
        let u2 = out.rows().find(|r| r.text("uid") == "u2").unwrap();
        assert_eq!(u2.text("first_name"), "Thomas");
        assert_eq!(u2.text("last_name"), "Ferguson");
        assert_eq!(u2.text("birth_year"), "1971");
        let u3 = out.rows().find(|r| r.text("uid") == "u3").unwrap();
        assert_eq!(u3.text("agency"), "");
    }

    #[test]
    fn output_is_sorted_by_uid_with_contract_columns() {
        let a = Table::from_rows(
            ["notes", "uid", "last_name"],
            vec![vec!["x".into(), "u9".into(), "landry".into()], vec!["y".into(), "u1".into(), "doe".into()]],
        )
        .unwrap();
        let out = fuse_personnel(&[a]).unwrap();
        assert_eq!(out.columns(), &["uid", "last_name"]);
        assert_eq!(out.row(0).text("uid"), "u1");
    }

    #[test]
    fn every_source_needs_a_uid_column() {
        let ok = Table::new(["uid"]);
        let bad = Table::new(["first_name"]);
        let err = fuse_personnel(&[ok, bad]).unwrap_err();
        assert!(matches!(err, TableError::ColumnMissing { .. }));
    }
}
