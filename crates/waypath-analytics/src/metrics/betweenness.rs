//! Ordered-pair betweenness tally.
//!
//! # Overview
//!
//! For every ordered pair `(s, t)` of nodes, `s == t` included, the
//! aggregator runs one shortest-path search. When a path exists, each node
//! strictly between the endpoints gains one count. Pairs with no path are
//! skipped.
//!
//! Both `(s, t)` and `(t, s)` are visited, so on a symmetric graph every
//! interior node is counted twice per unordered pair: raw tallies are twice
//! the classical undirected betweenness. [`BetweennessTally::normalized`]
//! rescales explicitly.
//!
//! Only one shortest path per pair is counted (the one the engine's
//! tie-break selects), not a fractional share over all shortest paths.
//!
//! Complexity: `V²` searches, O(V² (V + E) log V) overall.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, instrument};
use waypath_core::config::Normalization;
use waypath_core::{GraphError, WeightedGraph};

use crate::search::{SearchOptions, SearchOutcome, search_indices};

/// Interior-node counts, one per node, in node declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetweennessTally {
    entries: Vec<(String, u64)>,
}

impl BetweennessTally {
    /// Count for `label`, or `None` if the label is not a node.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| *count)
    }

    /// `(label, count)` in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all nodes: the total number of interior visits.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries sorted by count, highest first. Equal counts keep declaration
    /// order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Scores after applying `normalization`, in declaration order.
    ///
    /// `Directed` divides by `(n - 1)(n - 2)`. With fewer than three nodes no
    /// node can be interior, and every score is 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalized(&self, normalization: Normalization) -> Vec<(&str, f64)> {
        let n = self.entries.len();
        let divisor = match normalization {
            Normalization::Raw => 1.0,
            Normalization::Halved => 2.0,
            Normalization::Directed if n < 3 => 0.0,
            Normalization::Directed => ((n - 1) * (n - 2)) as f64,
        };
        self.iter()
            .map(|(name, count)| {
                let score = if divisor > 0.0 {
                    count as f64 / divisor
                } else {
                    0.0
                };
                (name, score)
            })
            .collect()
    }
}

impl Serialize for BetweennessTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Tally interior visits over every ordered node pair.
///
/// # Errors
///
/// Any search error other than an unreachable target aborts the tally:
/// [`GraphError::MissingEdge`] for an unweighted adjacency entry that gets
/// relaxed.
pub fn betweenness(graph: &WeightedGraph) -> Result<BetweennessTally, GraphError> {
    betweenness_with(graph, &SearchOptions::default())
}

/// [`betweenness`] with interruption settings. A timeout in `options` applies
/// to each pair's search on its own; a deadline or token is shared by all of
/// them.
///
/// # Errors
///
/// As [`betweenness`], plus [`GraphError::Cancelled`] and
/// [`GraphError::DeadlineExceeded`].
#[instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn betweenness_with(
    graph: &WeightedGraph,
    options: &SearchOptions,
) -> Result<BetweennessTally, GraphError> {
    let mut counts = vec![0_u64; graph.node_count()];
    let mut searched = 0_usize;
    let mut skipped = 0_usize;

    for source in graph.node_indices() {
        for target in graph.node_indices() {
            searched += 1;
            match search_indices(graph, source, target, options)? {
                SearchOutcome::NoPathFound => {
                    skipped += 1;
                    debug!(
                        source = graph.label(source),
                        target = graph.label(target),
                        "pair skipped: no path"
                    );
                }
                SearchOutcome::Found(result) => {
                    if let [_, interior @ .., _] = result.path()?.as_slice() {
                        for node in interior {
                            counts[node.index()] += 1;
                        }
                    }
                }
            }
        }
    }

    let entries: Vec<(String, u64)> = graph
        .labels()
        .map(str::to_string)
        .zip(counts)
        .collect();
    let tally = BetweennessTally { entries };

    info!(
        pairs = searched,
        skipped,
        total = tally.total(),
        "betweenness tally complete"
    );
    Ok(tally)
}
