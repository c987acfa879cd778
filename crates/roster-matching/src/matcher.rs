//! Threshold matcher: scores every in-block candidate pair and decides.

use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use roster_core::config::MatchingConfig;
use roster_core::errors::{MatchError, RosterResult};
use roster_core::table::Table;

use crate::blocking::{BlockIndex, BlockKey};
use crate::report::ScoreReport;
use crate::similarity::RecordScorer;

/// A compared candidate pair with its full score breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPair {
    pub a_row: usize,
    pub b_row: usize,
    pub a_id: String,
    pub b_id: String,
    pub block: BlockKey,
    /// Field similarities, in configured field order.
    pub fields: Vec<f64>,
    pub score: f64,
}

/// An accepted (A id, B id) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPair {
    pub a_id: String,
    pub b_id: String,
    pub score: f64,
}

impl From<&ScoredPair> for MatchPair {
    fn from(p: &ScoredPair) -> Self {
        Self {
            a_id: p.a_id.clone(),
            b_id: p.b_id.clone(),
            score: p.score,
        }
    }
}

/// Every candidate pair of one comparison, in (A row, B row) order.
///
/// Decisions are derived views over this set, so asking for the score report
/// never changes what is accepted.
#[derive(Debug, Clone)]
pub struct CandidateScores {
    pub(crate) pairs: Vec<ScoredPair>,
    pub(crate) fields: Vec<String>,
    pub(crate) lower_bound: f64,
    pub(crate) shared_blocks: usize,
}

impl CandidateScores {
    pub fn pairs(&self) -> &[ScoredPair] {
        &self.pairs
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Blocks present on both sides.
    pub fn shared_blocks(&self) -> usize {
        self.shared_blocks
    }

    pub fn is_accepted(&self, pair: &ScoredPair) -> bool {
        pair.score >= self.lower_bound
    }

    /// All pairs at or above the lower bound.
    pub fn accepted(&self) -> impl Iterator<Item = &ScoredPair> + '_ {
        self.pairs.iter().filter(move |p| self.is_accepted(p))
    }

    /// Pairwise mode: the best accepted B for each A, in A row order.
    /// Ties go to the lowest B row.
    pub fn pairwise(&self) -> Vec<MatchPair> {
        let mut best: BTreeMap<usize, &ScoredPair> = BTreeMap::new();
        for pair in self.accepted() {
            match best.get(&pair.a_row) {
                Some(current) if current.score >= pair.score => {}
                _ => {
                    best.insert(pair.a_row, pair);
                }
            }
        }
        best.into_values().map(MatchPair::from).collect()
    }

    /// Cluster mode: every accepted pair as an undirected edge.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.accepted()
            .map(|p| (p.a_id.clone(), p.b_id.clone()))
            .collect()
    }

    /// Human-review export of every candidate, accepted or not.
    pub fn report(&self) -> ScoreReport {
        ScoreReport::new(self)
    }
}

/// Rows of `table` that take part in matching: non-empty ids, first
/// occurrence of each id.
pub fn matchable_rows(table: &Table, id_column: &str) -> Vec<usize> {
    let mut seen = HashSet::new();
    table
        .rows()
        .filter(|row| {
            let id = row.text(id_column);
            let id = id.trim();
            !id.is_empty() && seen.insert(id.to_string())
        })
        .map(|row| row.index())
        .collect()
}

/// Scores candidate pairs between two tables under one matching config.
pub struct ThresholdMatcher {
    config: MatchingConfig,
    scorer: RecordScorer,
}

impl ThresholdMatcher {
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let scorer = RecordScorer::from_config(&config.fields);
        Ok(Self { config, scorer })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Score every pair of rows that share a block key.
    ///
    /// Both tables must carry `id_column` and every block and field column.
    pub fn score(&self, a: &Table, b: &Table, id_column: &str) -> RosterResult<CandidateScores> {
        let mut required = self.config.required_columns();
        required.push(id_column);
        a.require_columns(&required, "match side A")?;
        b.require_columns(&required, "match side B")?;

        let a_index = BlockIndex::build(a, &matchable_rows(a, id_column), &self.config.block)?;
        let b_index = BlockIndex::build(b, &matchable_rows(b, id_column), &self.config.block)?;
        let shared = a_index.shared_blocks(&b_index);

        let per_block: Vec<Vec<ScoredPair>> = if self.config.parallel {
            shared
                .par_iter()
                .map(|(key, a_rows, b_rows)| self.score_block(key, a, a_rows, b, b_rows, id_column))
                .collect()
        } else {
            shared
                .iter()
                .map(|(key, a_rows, b_rows)| self.score_block(key, a, a_rows, b, b_rows, id_column))
                .collect()
        };

        let mut pairs: Vec<ScoredPair> = per_block.into_iter().flatten().collect();
        pairs.sort_by_key(|p| (p.a_row, p.b_row));

        tracing::debug!(
            shared_blocks = shared.len(),
            candidates = pairs.len(),
            "scored candidate pairs"
        );

        Ok(CandidateScores {
            pairs,
            fields: self.scorer.columns().map(String::from).collect(),
            lower_bound: self.config.lower_bound,
            shared_blocks: shared.len(),
        })
    }

    fn score_block(
        &self,
        key: &BlockKey,
        a: &Table,
        a_rows: &[usize],
        b: &Table,
        b_rows: &[usize],
        id_column: &str,
    ) -> Vec<ScoredPair> {
        let mut out = Vec::with_capacity(a_rows.len() * b_rows.len());
        for &i in a_rows {
            let row_a = a.row(i);
            for &j in b_rows {
                let row_b = b.row(j);
                let fields = self.scorer.field_scores(row_a, row_b);
                let score = self.scorer.aggregate(&fields);
                out.push(ScoredPair {
                    a_row: i,
                    b_row: j,
                    a_id: row_a.text(id_column).trim().to_string(),
                    b_id: row_b.text(id_column).trim().to_string(),
                    block: key.clone(),
                    fields,
                    score,
                });
            }
        }
        out
    }
}
