//! Blocking: only rows sharing a block key are ever compared.

use std::collections::BTreeMap;
use std::fmt;

use roster_core::config::{BlockKind, BlockPartConfig};
use roster_core::errors::MatchError;
use roster_core::table::{Row, Table};

/// Tuple of derived sub-keys, one per configured block part.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey(Vec<String>);

impl BlockKey {
    /// Derive the key of one row. Missing values yield an empty sub-key.
    pub fn of(row: Row<'_>, parts: &[BlockPartConfig]) -> Self {
        BlockKey(
            parts
                .iter()
                .map(|part| {
                    let value = row.get(&part.column).normalized();
                    match part.kind {
                        BlockKind::Exact => value,
                        BlockKind::FirstChar => value.chars().next().map(String::from).unwrap_or_default(),
                    }
                })
                .collect(),
        )
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("|"))
    }
}

/// Block key → row indices for one side of a comparison. Iteration order is the
/// key order, and row indices within a block keep table order.
#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    blocks: BTreeMap<BlockKey, Vec<usize>>,
}

impl BlockIndex {
    /// Index `rows` of `table` (a subset, e.g. after id deduplication).
    pub fn build(
        table: &Table,
        rows: &[usize],
        parts: &[BlockPartConfig],
    ) -> Result<Self, MatchError> {
        if let Some(part) = parts.iter().find(|p| !table.has_column(&p.column)) {
            return Err(MatchError::UnknownBlockColumn {
                column: part.column.clone(),
            });
        }
        let mut blocks: BTreeMap<BlockKey, Vec<usize>> = BTreeMap::new();
        for &index in rows {
            blocks
                .entry(BlockKey::of(table.row(index), parts))
                .or_default()
                .push(index);
        }
        Ok(Self { blocks })
    }

    pub fn get(&self, key: &BlockKey) -> Option<&[usize]> {
        self.blocks.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockKey, &[usize])> + '_ {
        self.blocks.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Blocks present on both sides, in key order: the only places candidate
    /// pairs come from.
    pub fn shared_blocks<'a>(
        &'a self,
        other: &'a BlockIndex,
    ) -> Vec<(&'a BlockKey, &'a [usize], &'a [usize])> {
        self.iter()
            .filter_map(|(key, rows)| other.get(key).map(|theirs| (key, rows, theirs)))
            .collect()
    }

    /// Number of cross pairs the shared blocks would produce.
    pub fn candidate_count(&self, other: &BlockIndex) -> usize {
        self.shared_blocks(other)
            .iter()
            .map(|(_, a, b)| a.len() * b.len())
            .sum()
    }
}
