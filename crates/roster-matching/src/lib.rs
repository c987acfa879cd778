//! # roster-matching
//!
//! Record linkage between two officer tables: blocking → per-field similarity →
//! threshold decision → union-find clustering. [`MatchEngine`] runs the whole
//! chain from a [`MatchingConfig`](roster_core::config::MatchingConfig).

pub mod blocking;
pub mod cluster;
pub mod engine;
pub mod mapping;
pub mod matcher;
pub mod report;
pub mod similarity;

pub use blocking::{BlockIndex, BlockKey};
pub use cluster::{Cluster, ClusterResolver};
pub use engine::{MatchEngine, MatchMetrics, MatchOutcome};
pub use mapping::UidMapping;
pub use matcher::{CandidateScores, MatchPair, ScoredPair, ThresholdMatcher};
pub use report::ScoreReport;
pub use similarity::{FieldSimilarity, RecordScorer};
