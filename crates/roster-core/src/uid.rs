//! Deterministic identifiers.
//!
//! A uid is the blake3 hash of a tuple of identity attributes, truncated to
//! [`UID_HEX_LEN`] hex characters. Each part is length-prefixed before hashing so
//! `("ab", "c")` and `("a", "bc")` never collide by concatenation.

use crate::constants::{UID_COLUMN, UID_HEX_LEN, UID_PART_SEPARATOR};
use crate::errors::TableError;
use crate::table::{Table, Value};

/// Hash an attribute tuple into a uid. Same tuple, same uid, on every run.
pub fn uid<S: AsRef<str>>(parts: &[S]) -> String {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        let bytes = part.as_ref().as_bytes();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
        hasher.update(&[UID_PART_SEPARATOR]);
    }
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..UID_HEX_LEN].to_string()
}

/// Compute the uid of every row from `columns` and write it to the `uid` column.
///
/// Values are normalized (trimmed, lower-cased) first so cosmetic differences in
/// casing do not split one identity into two uids.
pub fn assign_uids(table: &Table, columns: &[&str]) -> Result<Table, TableError> {
    table.require_columns(columns, "uid source")?;
    let uids = table
        .rows()
        .map(|row| {
            let parts: Vec<String> = columns.iter().map(|c| row.get(c).normalized()).collect();
            Value::Text(uid(&parts))
        })
        .collect();
    table.with_column(UID_COLUMN, uids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_is_fixed_length_lowercase_hex() {
        let id = uid(&["new orleans pd", "patrick", "peterman"]);
        assert_eq!(id.len(), UID_HEX_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn part_boundaries_matter() {
        assert_ne!(uid(&["ab", "c"]), uid(&["a", "bc"]));
        assert_ne!(uid(&["a"]), uid(&["a", ""]));
    }

    #[test]
    fn assign_uids_ignores_case_and_padding() {
        let table = Table::from_rows(
            ["agency", "first_name", "last_name"],
            vec![
                vec!["Kenner PD".into(), "Patrick".into(), "Peterman".into()],
                vec![" kenner pd".into(), "patrick".into(), "PETERMAN ".into()],
            ],
        )
        .unwrap();
        let out = assign_uids(&table, &["agency", "first_name", "last_name"]).unwrap();
        assert_eq!(out.row(0).text("uid"), out.row(1).text("uid"));
    }

    #[test]
    fn assign_uids_requires_source_columns() {
        let table = Table::new(["first_name"]);
        assert!(assign_uids(&table, &["first_name", "last_name"]).is_err());
    }
}
