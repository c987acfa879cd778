//! Matching configuration: blocking parts, scored fields, decision rule.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::MatchError;

/// How a block sub-key is derived from one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// First character of the normalized value.
    FirstChar,
    /// The whole normalized value.
    Exact,
}

/// One component of a block key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPartConfig {
    pub column: String,
    pub kind: BlockKind,
}

impl BlockPartConfig {
    pub fn first_char(column: &str) -> Self {
        Self {
            column: column.to_string(),
            kind: BlockKind::FirstChar,
        }
    }

    pub fn exact(column: &str) -> Self {
        Self {
            column: column.to_string(),
            kind: BlockKind::Exact,
        }
    }
}

/// Similarity function applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorerConfig {
    JaroWinkler,
    DamerauLevenshtein,
    Exact,
    /// Linear decay from 1.0 at the same day to 0.0 at `max_days` apart.
    Date {
        #[serde(default = "default_max_days")]
        max_days: u32,
    },
}

fn default_max_days() -> u32 {
    defaults::DEFAULT_DATE_MAX_DAYS
}

fn default_weight() -> f64 {
    defaults::DEFAULT_FIELD_WEIGHT
}

/// A scored field: the column compared on both sides and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub column: String,
    pub scorer: ScorerConfig,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl FieldConfig {
    pub fn new(column: &str, scorer: ScorerConfig) -> Self {
        Self {
            column: column.to_string(),
            scorer,
            weight: defaults::DEFAULT_FIELD_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Whether accepted pairs are resolved one-to-one or merged into clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Best B per A.
    #[default]
    Pairwise,
    /// Every accepted pair, merged transitively.
    Cluster,
}

/// Which member id names a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representative {
    #[default]
    Smallest,
    FirstSeen,
}

/// Matching subsystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub block: Vec<BlockPartConfig>,
    pub fields: Vec<FieldConfig>,
    /// Accept a pair iff its aggregate score is at least this. Must lie in (0, 1].
    pub lower_bound: f64,
    pub mode: MatchMode,
    pub representative: Representative,
    /// Score blocks on the rayon pool.
    pub parallel: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            block: vec![
                BlockPartConfig::first_char("first_name"),
                BlockPartConfig::first_char("last_name"),
                BlockPartConfig::exact("agency"),
            ],
            fields: vec![
                FieldConfig::new("first_name", ScorerConfig::JaroWinkler),
                FieldConfig::new("last_name", ScorerConfig::JaroWinkler),
            ],
            lower_bound: defaults::DEFAULT_LOWER_BOUND,
            mode: MatchMode::default(),
            representative: Representative::default(),
            parallel: defaults::DEFAULT_PARALLEL,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.lower_bound > 0.0 && self.lower_bound <= 1.0) {
            return Err(MatchError::InvalidThreshold {
                value: self.lower_bound,
            });
        }
        if self.fields.is_empty() {
            return Err(MatchError::NoFields);
        }
        for field in &self.fields {
            if !(field.weight > 0.0 && field.weight.is_finite()) {
                return Err(MatchError::InvalidWeight {
                    field: field.column.clone(),
                    weight: field.weight,
                });
            }
            if let ScorerConfig::Date { max_days: 0 } = field.scorer {
                return Err(MatchError::InvalidDateDecay {
                    field: field.column.clone(),
                });
            }
        }
        Ok(())
    }

    /// Columns either side must carry: every block column and every field column.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for column in self
            .block
            .iter()
            .map(|b| b.column.as_str())
            .chain(self.fields.iter().map(|f| f.column.as_str()))
        {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }
}
