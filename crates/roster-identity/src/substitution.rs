//! Uid substitution: rewrite a uid column through a [`UidMapping`].

use roster_core::errors::TableError;
use roster_core::table::{Table, Value};
use roster_matching::UidMapping;

/// Replace every value of `column` with its mapped uid. Unmapped and missing
/// values are left as they are.
pub fn apply_uid_mapping(table: &Table, column: &str, mapping: &UidMapping) -> Result<Table, TableError> {
    table.require_columns(&[column], "uid substitution")?;
    let out = table.map_column(column, |value| {
        if value.is_missing() {
            return value.clone();
        }
        let text = value.as_text();
        let id = text.trim();
        if mapping.is_mapped(id) {
            Value::text(mapping.get(id))
        } else {
            value.clone()
        }
    });
    tracing::debug!(column, mapped = mapping.len(), "applied uid mapping");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_ids_are_replaced_and_others_kept() {
        let table = Table::from_rows(
            ["uid", "allegation"],
            vec![
                vec!["a1".into(), "x".into()],
                vec!["a2".into(), "y".into()],
                vec![Value::Empty, "z".into()],
            ],
        )
        .unwrap();
        let mapping: UidMapping = [("a1".to_string(), "b7".to_string())].into_iter().collect();
        let out = apply_uid_mapping(&table, "uid", &mapping).unwrap();
        assert_eq!(out.row(0).text("uid"), "b7");
        assert_eq!(out.row(1).text("uid"), "a2");
        assert_eq!(out.row(2).get("uid"), &Value::Empty);
        assert_eq!(out.row(0).text("allegation"), "x");
    }

    #[test]
    fn missing_column_is_fatal() {
        let table = Table::new(["first_name"]);
        assert!(apply_uid_mapping(&table, "uid", &UidMapping::new()).is_err());
    }
}
