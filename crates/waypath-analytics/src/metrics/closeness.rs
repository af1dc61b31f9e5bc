//! Closeness centrality over directed shortest-path trees.
//!
//! For each node `v`, run the search from `v` to exhaustion. With `r` nodes
//! reachable from `v` (excluding `v`) at total distance `Σd`:
//!
//! ```text
//! closeness(v) = r / Σd        (0 when v reaches nothing)
//! ```
//!
//! Only reachable nodes contribute, so the graph need not be strongly
//! connected. Scores are in inverse weight units.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{info, instrument, trace};
use waypath_core::{GraphError, WeightedGraph};

use crate::search::{SearchOptions, shortest_path_tree_from};

/// One node's closeness inputs and score.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Closeness {
    pub label: String,
    /// Nodes reachable from this one, itself excluded.
    pub reachable: usize,
    /// Sum of shortest-path distances to every reachable node.
    pub total_distance: f64,
    pub score: f64,
}

/// Closeness per node, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosenessScores {
    entries: Vec<Closeness>,
}

impl ClosenessScores {
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Closeness> {
        self.entries.iter().find(|c| c.label == label)
    }

    /// Score for `label`, or `None` if the label is not a node.
    #[must_use]
    pub fn score(&self, label: &str) -> Option<f64> {
        self.get(label).map(|c| c.score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Closeness> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by score, highest first. Equal scores keep declaration
    /// order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&Closeness> {
        let mut ranked: Vec<&Closeness> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

impl Serialize for ClosenessScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.score)?;
        }
        map.end()
    }
}

/// Closeness for every node.
///
/// # Errors
///
/// [`GraphError::MissingEdge`] if any reachable adjacency entry has no
/// weight. Each tree runs to exhaustion, so this is stricter than a single
/// point-to-point search.
pub fn closeness(graph: &WeightedGraph) -> Result<ClosenessScores, GraphError> {
    closeness_with(graph, &SearchOptions::default())
}

/// [`closeness`] with interruption settings. A timeout in `options` applies
/// to each node's tree on its own.
///
/// # Errors
///
/// As [`closeness`], plus [`GraphError::Cancelled`] and
/// [`GraphError::DeadlineExceeded`].
#[instrument(skip_all, fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_with(
    graph: &WeightedGraph,
    options: &SearchOptions,
) -> Result<ClosenessScores, GraphError> {
    let mut entries = Vec::with_capacity(graph.node_count());

    for source in graph.node_indices() {
        let tree = shortest_path_tree_from(graph, source, options)?;
        let reachable = tree.reachable_count().saturating_sub(1);
        let total_distance: f64 = tree.order.iter().map(|(_, d)| d).sum();
        let score = if total_distance > 0.0 {
            reachable as f64 / total_distance
        } else {
            0.0
        };
        trace!(node = graph.label(source), reachable, total_distance, score);

        entries.push(Closeness {
            label: graph.label(source).to_string(),
            reachable,
            total_distance,
            score,
        });
    }

    info!(nodes = entries.len(), "closeness computed");
    Ok(ClosenessScores { entries })
}
