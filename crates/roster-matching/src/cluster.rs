//! Cluster resolver: transitive closure of accepted pairs via union-find.

use std::collections::{BTreeMap, HashMap};

use petgraph::unionfind::UnionFind;
use roster_core::config::Representative;
use serde::{Deserialize, Serialize};

/// One identity group. `members` is sorted and includes the representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub representative: String,
    pub members: Vec<String>,
}

impl Cluster {
    /// Members other than the representative.
    pub fn others(&self) -> impl Iterator<Item = &str> + '_ {
        self.members
            .iter()
            .map(String::as_str)
            .filter(move |m| *m != self.representative)
    }

    /// Representative first, then the other members.
    pub fn as_tuple(&self) -> Vec<String> {
        std::iter::once(self.representative.clone())
            .chain(self.others().map(String::from))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.binary_search_by(|m| m.as_str().cmp(id)).is_ok()
    }
}

/// Groups identifiers connected by edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterResolver {
    rule: Representative,
}

impl ClusterResolver {
    pub fn new(rule: Representative) -> Self {
        Self { rule }
    }

    /// Partition every id mentioned in `edges` into connected components.
    ///
    /// The partition does not depend on edge order. With `Representative::FirstSeen`
    /// the representative is the member that appears first in `edges`.
    /// Clusters come back sorted by representative.
    pub fn resolve<S: AsRef<str>>(&self, edges: &[(S, S)]) -> Vec<Cluster> {
        let mut ids: Vec<&str> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for (a, b) in edges {
            for id in [a.as_ref(), b.as_ref()] {
                if !index.contains_key(id) {
                    index.insert(id, ids.len());
                    ids.push(id);
                }
            }
        }

        let mut sets = UnionFind::<usize>::new(ids.len());
        for (a, b) in edges {
            sets.union(index[a.as_ref()], index[b.as_ref()]);
        }

        // Label → member positions, in first-seen order.
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (position, label) in sets.into_labeling().into_iter().enumerate() {
            groups.entry(label).or_default().push(position);
        }

        let mut clusters: Vec<Cluster> = groups
            .into_values()
            .map(|positions| {
                let representative = match self.rule {
                    Representative::FirstSeen => ids[positions[0]],
                    Representative::Smallest => positions
                        .iter()
                        .map(|&p| ids[p])
                        .min()
                        .unwrap_or_default(),
                };
                let mut members: Vec<String> =
                    positions.iter().map(|&p| ids[p].to_string()).collect();
                members.sort();
                Cluster {
                    representative: representative.to_string(),
                    members,
                }
            })
            .collect();
        clusters.sort_by(|x, y| x.representative.cmp(&y.representative));
        clusters
    }
}
