//! Canonicalization of officer rows against externally supplied uid clusters.

use std::collections::{HashMap, HashSet};

use roster_core::constants::{NAME_COLUMNS, UID_COLUMN};
use roster_core::errors::TableError;
use roster_core::table::{Table, Value};
use roster_core::DataQualityWarning;
use roster_observability::canonicalize_span;

/// Rewrites member uids to their cluster representative and blanks duplicate
/// names.
///
/// Clusters are tuples whose first element is the representative. Applying a
/// canonicalizer to its own output changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    /// Non-representative member → representative.
    representative_of: HashMap<String, String>,
    clusters: usize,
    warnings: Vec<DataQualityWarning>,
}

impl Canonicalizer {
    pub fn new<C, S>(clusters: &[C]) -> Self
    where
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        // Member → the representative it was listed under. A representative
        // absorbed by a later cluster gains a parent itself, so its members
        // follow it without being touched.
        let mut parent: HashMap<String, String> = HashMap::new();
        let mut warnings = Vec::new();
        let mut count = 0;
        for cluster in clusters {
            let cluster: &[S] = cluster.as_ref();
            let Some((representative, members)) = cluster.split_first() else {
                continue;
            };
            count += 1;
            let representative: &str = representative.as_ref();
            let root = find_root(&mut parent, representative);
            for member in members {
                let member: &str = member.as_ref();
                if member == root {
                    continue;
                }
                if parent.contains_key(member) {
                    let kept = find_root(&mut parent, member);
                    if kept != root {
                        warnings.push(DataQualityWarning::ConflictingCluster {
                            uid: member.to_string(),
                            kept,
                            ignored: root.clone(),
                        });
                    }
                    continue;
                }
                parent.insert(member.to_string(), root.clone());
            }
        }
        let members: Vec<String> = parent.keys().cloned().collect();
        let representative_of: HashMap<String, String> = members
            .into_iter()
            .map(|member| {
                let root = find_root(&mut parent, &member);
                (member, root)
            })
            .collect();
        for warning in &warnings {
            tracing::warn!(%warning, "conflicting cluster membership");
        }
        Self {
            representative_of,
            clusters: count,
            warnings,
        }
    }

    /// Conflicts found while reading the clusters.
    pub fn warnings(&self) -> &[DataQualityWarning] {
        &self.warnings
    }

    /// Canonicalize `table`. Row count and order are preserved.
    ///
    /// A row whose uid is a non-representative member takes the representative
    /// uid and has its name columns blanked. Rows already carrying the
    /// representative uid keep their names; when no row does, the first member
    /// row keeps them so every identity stays named once.
    pub fn apply(&self, table: &Table) -> Result<Table, TableError> {
        table.require_columns(&[UID_COLUMN], "officers")?;
        let span = canonicalize_span!(table.len(), self.clusters);
        let _guard = span.enter();

        let uids: Vec<String> = table
            .rows()
            .map(|row| row.text(UID_COLUMN).trim().to_string())
            .collect();

        let present: HashSet<&str> = uids.iter().map(String::as_str).collect();
        let mut named: HashSet<&str> = HashSet::new();
        let mut keepers: HashSet<usize> = HashSet::new();
        for (index, uid) in uids.iter().enumerate() {
            if let Some(rep) = self.representative_of.get(uid) {
                if !present.contains(rep.as_str()) && named.insert(rep.as_str()) {
                    keepers.insert(index);
                }
            }
        }

        let uid_col = table.column_index(UID_COLUMN);
        let name_cols: Vec<usize> = NAME_COLUMNS
            .iter()
            .filter_map(|c| table.column_index(c))
            .collect();

        let out = table.map_rows(|row| {
            let mut values = row.values().to_vec();
            if let Some(rep) = self.representative_of.get(&uids[row.index()]) {
                if let Some(col) = uid_col {
                    values[col] = Value::text(rep.as_str());
                }
                if !keepers.contains(&row.index()) {
                    for &col in &name_cols {
                        values[col] = Value::text("");
                    }
                }
            }
            values
        })?;
        let blanked = uids
            .iter()
            .enumerate()
            .filter(|(i, uid)| self.representative_of.contains_key(*uid) && !keepers.contains(i))
            .count();
        tracing::debug!(rows = out.len(), blanked, "canonicalized officers");
        Ok(out)
    }
}

/// Root of `uid`, compressing the path walked so later lookups are direct.
fn find_root(parent: &mut HashMap<String, String>, uid: &str) -> String {
    let mut root = uid;
    while let Some(next) = parent.get(root) {
        root = next.as_str();
    }
    let root = root.to_string();
    let mut current = uid.to_string();
    while let Some(next) = parent.get(&current).cloned() {
        if next == root {
            break;
        }
        parent.insert(current, root.clone());
        current = next;
    }
    root
}

/// Canonicalize `table` against `clusters` (representative first in each tuple).
pub fn canonicalize_officers<C, S>(table: &Table, clusters: &[C]) -> Result<Table, TableError>
where
    C: AsRef<[S]>,
    S: AsRef<str>,
{
    Canonicalizer::new(clusters).apply(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn officers(rows: &[(&str, &str)]) -> Table {
        Table::from_rows(
            ["uid", "first_name", "badge_no"],
            rows.iter()
                .map(|(uid, name)| vec![Value::text(*uid), Value::text(*name), Value::Int(7)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn members_take_representative_and_lose_names() {
        let table = officers(&[("u1", "patric"), ("u2", "patrick")]);
        let out = canonicalize_officers(&table, &[vec!["u2", "u1"]]).unwrap();
        assert_eq!(out.row(0).text("uid"), "u2");
        assert_eq!(out.row(0).text("first_name"), "");
        assert_eq!(out.row(0).get("badge_no"), &Value::Int(7));
        assert_eq!(out.row(1).text("first_name"), "patrick");
    }

    #[test]
    fn first_member_keeps_names_when_representative_row_is_absent() {
        let table = officers(&[("u3", "tom"), ("u1", "thomas"), ("u4", "tommy")]);
        let out = canonicalize_officers(&table, &[vec!["u9", "u1", "u4"]]).unwrap();
        assert_eq!(out.row(0).text("uid"), "u3");
        assert_eq!(out.row(1).text("uid"), "u9");
        assert_eq!(out.row(1).text("first_name"), "thomas");
        assert_eq!(out.row(2).text("uid"), "u9");
        assert_eq!(out.row(2).text("first_name"), "");
    }

    #[test]
    fn canonicalizing_twice_changes_nothing() {
        let table = officers(&[("u1", "a"), ("u2", "b"), ("u5", "c"), ("u6", "d")]);
        let clusters = [vec!["u9", "u1", "u2"], vec!["u5", "u6"]];
        let once = canonicalize_officers(&table, &clusters).unwrap();
        let twice = canonicalize_officers(&once, &clusters).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn conflicting_membership_keeps_first_cluster() {
        let canonicalizer = Canonicalizer::new(&[vec!["r1", "m"], vec!["r2", "m"]]);
        assert_eq!(canonicalizer.warnings().len(), 1);
        let out = canonicalizer.apply(&officers(&[("m", "x")])).unwrap();
        assert_eq!(out.row(0).text("uid"), "r1");
    }

    #[test]
    fn representative_joining_later_cluster_brings_its_members() {
        let clusters = [vec!["b", "c", "d"], vec!["a", "b"], vec!["z", "a"]];
        let table = officers(&[("c", "x"), ("d", "y"), ("b", "w"), ("a", "v")]);
        let out = canonicalize_officers(&table, &clusters).unwrap();
        let uids: Vec<String> = out.rows().map(|r| r.text("uid").into_owned()).collect();
        assert_eq!(uids, vec!["z"; 4]);
        assert_eq!(canonicalize_officers(&out, &clusters).unwrap(), out);
    }

    #[test]
    fn long_cluster_chains_resolve_to_last_representative() {
        // Each cluster absorbs the previous representative.
        let clusters: Vec<Vec<String>> = (0..20_000)
            .map(|i| vec![format!("r{}", i + 1), format!("r{i}"), format!("m{i}")])
            .collect();
        let canonicalizer = Canonicalizer::new(&clusters);
        let out = canonicalizer.apply(&officers(&[("m0", "x"), ("r0", "y")])).unwrap();
        assert_eq!(out.row(0).text("uid"), "r20000");
        assert_eq!(out.row(1).text("uid"), "r20000");
    }

    #[test]
    fn missing_uid_column_is_fatal() {
        let table = Table::new(["first_name"]);
        let err = canonicalize_officers(&table, &[vec!["a", "b"]]).unwrap_err();
        assert!(matches!(err, TableError::ColumnMissing { .. }));
    }
}
