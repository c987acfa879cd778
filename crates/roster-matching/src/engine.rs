//! MatchEngine: blocking → scoring → decision → clustering for one pair of tables.

use std::collections::{HashMap, HashSet};

use roster_core::config::{MatchMode, MatchingConfig, Representative};
use roster_core::errors::{MatchError, RosterResult};
use roster_core::table::Table;
use roster_observability::match_span;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cluster::{Cluster, ClusterResolver};
use crate::mapping::UidMapping;
use crate::matcher::{CandidateScores, MatchPair, ThresholdMatcher};
use crate::report::ScoreReport;

/// Counters for one run, logged on completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMetrics {
    pub a_rows: usize,
    pub b_rows: usize,
    pub shared_blocks: usize,
    pub candidate_pairs: usize,
    pub accepted_pairs: usize,
    pub clusters: usize,
    pub mapped_ids: usize,
}

/// Everything one matching run produces.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// A id → B id substitution, identity for unmatched ids.
    pub mapping: UidMapping,
    /// Accepted pairs: the best B per A in pairwise mode, every accepted pair in
    /// cluster mode.
    pub pairs: Vec<MatchPair>,
    pub clusters: Vec<Cluster>,
    pub scores: CandidateScores,
    pub metrics: MatchMetrics,
}

impl MatchOutcome {
    pub fn report(&self) -> ScoreReport {
        self.scores.report()
    }
}

/// The matching engine.
pub struct MatchEngine {
    matcher: ThresholdMatcher,
    resolver: ClusterResolver,
}

impl MatchEngine {
    /// Create an engine, validating the config.
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        let resolver = ClusterResolver::new(config.representative);
        Ok(Self {
            matcher: ThresholdMatcher::new(config)?,
            resolver,
        })
    }

    pub fn config(&self) -> &MatchingConfig {
        self.matcher.config()
    }

    /// Match rows of `a` against rows of `b` by their `id_column` identifiers.
    pub fn run(&self, a: &Table, b: &Table, id_column: &str) -> RosterResult<MatchOutcome> {
        let config = self.matcher.config();
        let span = match_span!(config.mode, a.len(), b.len());
        let _guard = span.enter();

        let scores = self.matcher.score(a, b, id_column)?;

        let (pairs, clusters, mapping) = match config.mode {
            MatchMode::Pairwise => {
                let pairs = scores.pairwise();
                let edges: Vec<(&str, &str)> = pairs
                    .iter()
                    .map(|p| (p.a_id.as_str(), p.b_id.as_str()))
                    .collect();
                let clusters = self.resolver.resolve(&edges);
                let mapping = UidMapping::from_pairs(&pairs);
                (pairs, clusters, mapping)
            }
            MatchMode::Cluster => {
                let pairs: Vec<MatchPair> = scores.accepted().map(MatchPair::from).collect();
                let clusters = self.resolver.resolve(&scores.edges());
                let mapping = cluster_mapping(&pairs, &clusters, config.representative);
                (pairs, clusters, mapping)
            }
        };

        let metrics = MatchMetrics {
            a_rows: a.len(),
            b_rows: b.len(),
            shared_blocks: scores.shared_blocks(),
            candidate_pairs: scores.pairs().len(),
            accepted_pairs: pairs.len(),
            clusters: clusters.len(),
            mapped_ids: mapping.len(),
        };
        info!(
            candidates = metrics.candidate_pairs,
            accepted = metrics.accepted_pairs,
            clusters = metrics.clusters,
            mapped = metrics.mapped_ids,
            "matching complete"
        );

        Ok(MatchOutcome {
            mapping,
            pairs,
            clusters,
            scores,
            metrics,
        })
    }
}

/// Send every A id of a cluster to one B id of the same cluster: the smallest,
/// or the first B id seen among accepted pairs.
fn cluster_mapping(pairs: &[MatchPair], clusters: &[Cluster], rule: Representative) -> UidMapping {
    let a_ids: HashSet<&str> = pairs.iter().map(|p| p.a_id.as_str()).collect();
    // B id → position of its first appearance among accepted pairs.
    let mut b_rank: HashMap<&str, usize> = HashMap::new();
    for pair in pairs {
        let next = b_rank.len();
        b_rank.entry(pair.b_id.as_str()).or_insert(next);
    }

    let mut mapping = UidMapping::new();
    for cluster in clusters {
        let b_members = cluster
            .members
            .iter()
            .filter_map(|m| b_rank.get(m.as_str()).map(|rank| (m.as_str(), *rank)));
        let target = match rule {
            Representative::Smallest => b_members.min_by_key(|(id, _)| *id),
            Representative::FirstSeen => b_members.min_by_key(|(_, rank)| *rank),
        }
        .map(|(id, _)| id);
        let Some(target) = target else {
            continue;
        };
        for member in &cluster.members {
            if a_ids.contains(member.as_str()) && member != target {
                mapping.insert(member.as_str(), target);
            }
        }
    }
    mapping
}
