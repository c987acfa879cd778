//! Per-field similarity functions and the record scorer that combines them.
//!
//! Every function maps a pair of cells to [0, 1], is symmetric, and scores a
//! missing value on either side as 0.

use roster_core::config::{FieldConfig, ScorerConfig};
use roster_core::dates::parse_date;
use roster_core::table::{Row, Value};

/// A similarity function over one field.
pub trait FieldSimilarity: Send + Sync {
    fn name(&self) -> &'static str;

    /// Similarity of two present values.
    fn similarity(&self, a: &Value, b: &Value) -> f64;

    /// Similarity with the missing-value rule applied.
    fn score(&self, a: &Value, b: &Value) -> f64 {
        if a.is_missing() || b.is_missing() {
            return 0.0;
        }
        self.similarity(a, b).clamp(0.0, 1.0)
    }
}

/// Orders a pair of normalized strings so asymmetric string metrics still give
/// sim(a, b) == sim(b, a).
fn ordered(a: &Value, b: &Value) -> (String, String) {
    let (a, b) = (a.normalized(), b.normalized());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Jaro-Winkler similarity; forgiving of typos near the end of names.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl FieldSimilarity for JaroWinkler {
    fn name(&self) -> &'static str {
        "jaro_winkler"
    }

    fn similarity(&self, a: &Value, b: &Value) -> f64 {
        let (a, b) = ordered(a, b);
        strsim::jaro_winkler(&a, &b)
    }
}

/// Normalized Damerau-Levenshtein similarity; counts transpositions as one edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl FieldSimilarity for DamerauLevenshtein {
    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }

    fn similarity(&self, a: &Value, b: &Value) -> f64 {
        let (a, b) = ordered(a, b);
        strsim::normalized_damerau_levenshtein(&a, &b)
    }
}

/// 1 when the normalized texts are equal, else 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl FieldSimilarity for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn similarity(&self, a: &Value, b: &Value) -> f64 {
        if a.normalized() == b.normalized() {
            1.0
        } else {
            0.0
        }
    }
}

/// Date proximity: 1.0 on the same day, decaying linearly to 0.0 at `max_days`.
/// Unparseable dates count as missing.
#[derive(Debug, Clone, Copy)]
pub struct DateSimilarity {
    pub max_days: u32,
}

impl FieldSimilarity for DateSimilarity {
    fn name(&self) -> &'static str {
        "date"
    }

    fn similarity(&self, a: &Value, b: &Value) -> f64 {
        let (Some(a), Some(b)) = (parse_date(a, None), parse_date(b, None)) else {
            return 0.0;
        };
        let days = (a - b).num_days().unsigned_abs() as f64;
        (1.0 - days / f64::from(self.max_days)).max(0.0)
    }
}

/// Build the similarity function a field is configured with.
pub fn similarity_for(scorer: ScorerConfig) -> Box<dyn FieldSimilarity> {
    match scorer {
        ScorerConfig::JaroWinkler => Box::new(JaroWinkler),
        ScorerConfig::DamerauLevenshtein => Box::new(DamerauLevenshtein),
        ScorerConfig::Exact => Box::new(ExactMatch),
        ScorerConfig::Date { max_days } => Box::new(DateSimilarity { max_days }),
    }
}

/// One configured field: the column compared and its similarity function.
pub struct ScoredField {
    pub column: String,
    pub weight: f64,
    pub similarity: Box<dyn FieldSimilarity>,
}

/// Scores record pairs over a fixed list of fields.
pub struct RecordScorer {
    fields: Vec<ScoredField>,
}

impl RecordScorer {
    pub fn new(fields: Vec<ScoredField>) -> Self {
        Self { fields }
    }

    pub fn from_config(fields: &[FieldConfig]) -> Self {
        Self::new(
            fields
                .iter()
                .map(|f| ScoredField {
                    column: f.column.clone(),
                    weight: f.weight,
                    similarity: similarity_for(f.scorer),
                })
                .collect(),
        )
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.column.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Per-field similarities of `a` against `b`, in field order.
    pub fn field_scores(&self, a: Row<'_>, b: Row<'_>) -> Vec<f64> {
        self.fields
            .iter()
            .map(|f| f.similarity.score(a.get(&f.column), b.get(&f.column)))
            .collect()
    }

    /// Weighted mean of field similarities. With the default weights this is the
    /// plain arithmetic mean.
    pub fn aggregate(&self, scores: &[f64]) -> f64 {
        let total: f64 = self.fields.iter().map(|f| f.weight).sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.fields
            .iter()
            .zip(scores)
            .map(|(f, s)| f.weight * s)
            .sum::<f64>()
            / total
    }
}
