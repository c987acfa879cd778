//! Identifier substitution with an identity default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::matcher::MatchPair;

/// A total function over identifiers: the matched target where one is known,
/// the identifier itself everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidMapping {
    map: BTreeMap<String, String>,
}

impl UidMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// A id → B id for each accepted pair. A later pair for the same A id
    /// does not replace an earlier one.
    pub fn from_pairs(pairs: &[MatchPair]) -> Self {
        let mut mapping = Self::new();
        for pair in pairs {
            mapping.insert_first(&pair.a_id, &pair.b_id);
        }
        mapping
    }

    /// Every cluster member → its representative.
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        let mut mapping = Self::new();
        for cluster in clusters {
            for member in cluster.others() {
                mapping.insert_first(member, &cluster.representative);
            }
        }
        mapping
    }

    fn insert_first(&mut self, from: &str, to: &str) {
        if from != to {
            self.map.entry(from.to_string()).or_insert_with(|| to.to_string());
        }
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.map.insert(from.into(), to.into());
    }

    /// Mapped id, or `id` unchanged.
    pub fn get<'a>(&'a self, id: &'a str) -> &'a str {
        self.map.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn is_mapped(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Number of ids that map somewhere else.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for UidMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (from, to) in iter {
            mapping.insert_first(&from, &to);
        }
        mapping
    }
}
