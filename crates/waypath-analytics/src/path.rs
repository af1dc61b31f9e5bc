//! Path reconstruction from a predecessor map.
//!
//! The search engine records, for every node it reaches, the node it was
//! reached from. The source maps to the sentinel (`None`), which is where the
//! walk back from the target stops:
//!
//! ```text
//! target → previous[target] → previous[previous[target]] → … → source
//! ```
//!
//! The walk is then reversed into source-to-target order.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use serde::Serialize;
use tracing::instrument;
use waypath_core::{GraphError, WeightedGraph};

use crate::search::{SearchOptions, SearchOutcome, search_with};

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// Node → the node it was reached from. `Some(None)` marks the source; a
/// node that was never reached is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predecessors(HashMap<NodeIndex, Option<NodeIndex>>);

impl Predecessors {
    /// A map containing only `source`, mapped to the sentinel.
    #[must_use]
    pub fn rooted(source: NodeIndex) -> Self {
        let mut map = HashMap::new();
        map.insert(source, None);
        Self(map)
    }

    /// Record that `node` was reached from `from` (`None` for a source).
    pub fn insert(&mut self, node: NodeIndex, from: Option<NodeIndex>) {
        self.0.insert(node, from);
    }

    /// The predecessor entry for `node`: `None` if absent, `Some(None)` for
    /// the sentinel.
    #[must_use]
    pub fn get(&self, node: NodeIndex) -> Option<Option<NodeIndex>> {
        self.0.get(&node).copied()
    }

    #[must_use]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.0.contains_key(&node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Walk the predecessor chain from `target` back to the sentinel and return
/// the nodes in source-to-target order.
///
/// # Errors
///
/// Returns [`GraphError::DisconnectedPath`] if `target` is not in
/// `previous` (the search never reached it), or if the chain does not end in
/// a sentinel.
pub fn build_path(previous: &Predecessors, target: NodeIndex) -> Result<Vec<NodeIndex>, GraphError> {
    let disconnected = || GraphError::DisconnectedPath { target };

    let mut path = vec![target];
    let mut current = previous.get(target).ok_or_else(disconnected)?;
    while let Some(node) = current {
        // A well-formed chain visits each entry at most once.
        if path.len() > previous.len() {
            return Err(disconnected());
        }
        path.push(node);
        current = previous.get(node).ok_or_else(disconnected)?;
    }
    path.reverse();
    Ok(path)
}

// ---------------------------------------------------------------------------
// Labelled single-query result
// ---------------------------------------------------------------------------

/// A shortest path by label, with its total weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub nodes: Vec<String>,
    pub distance: f64,
}

impl ShortestPath {
    /// Number of edges on the path.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Nodes strictly between the endpoints.
    #[must_use]
    pub fn interior(&self) -> &[String] {
        if self.nodes.len() < 2 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }
}

/// Single-query mode: search and reconstruct in one step. `Ok(None)` means
/// no path exists.
///
/// # Errors
///
/// As [`crate::search::search`].
pub fn shortest_path(
    graph: &WeightedGraph,
    source: &str,
    target: &str,
) -> Result<Option<ShortestPath>, GraphError> {
    shortest_path_with(graph, source, target, &SearchOptions::default())
}

/// [`shortest_path`] with a deadline and/or cancellation token.
///
/// # Errors
///
/// As [`crate::search::search_with`].
#[instrument(skip(graph, options))]
pub fn shortest_path_with(
    graph: &WeightedGraph,
    source: &str,
    target: &str,
    options: &SearchOptions,
) -> Result<Option<ShortestPath>, GraphError> {
    match search_with(graph, source, target, options)? {
        SearchOutcome::NoPathFound => Ok(None),
        SearchOutcome::Found(result) => {
            let nodes = result
                .path()?
                .into_iter()
                .map(|n| graph.label(n).to_string())
                .collect();
            Ok(Some(ShortestPath {
                nodes,
                distance: result.distance,
            }))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::graph::reference::travel_graph;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn source_only_chain_is_single_node() {
        let previous = Predecessors::rooted(n(4));
        assert_eq!(build_path(&previous, n(4)), Ok(vec![n(4)]));
    }

    #[test]
    fn chain_is_reversed_into_source_order() {
        let mut previous = Predecessors::rooted(n(0));
        previous.insert(n(2), Some(n(0)));
        previous.insert(n(5), Some(n(2)));
        previous.insert(n(1), Some(n(5)));

        assert_eq!(build_path(&previous, n(1)), Ok(vec![n(0), n(2), n(5), n(1)]));
        assert_eq!(build_path(&previous, n(2)), Ok(vec![n(0), n(2)]));
    }

    #[test]
    fn absent_target_is_disconnected() {
        let previous = Predecessors::rooted(n(0));
        assert_eq!(
            build_path(&previous, n(7)),
            Err(GraphError::DisconnectedPath { target: n(7) })
        );
    }

    #[test]
    fn broken_chain_is_disconnected() {
        let mut previous = Predecessors::default();
        previous.insert(n(3), Some(n(8)));
        assert!(build_path(&previous, n(3)).is_err());
    }

    #[test]
    fn looping_chain_terminates() {
        let mut previous = Predecessors::default();
        previous.insert(n(1), Some(n(2)));
        previous.insert(n(2), Some(n(1)));
        assert_eq!(
            build_path(&previous, n(1)),
            Err(GraphError::DisconnectedPath { target: n(1) })
        );
    }

    #[test]
    fn labelled_shortest_path() {
        let g = travel_graph().expect("build");
        let path = shortest_path(&g, "start", "treasure")
            .expect("search")
            .expect("path exists");

        assert_eq!(path.nodes, ["start", "city", "castle", "treasure"]);
        assert!((path.distance - 193.0).abs() < f64::EPSILON);
        assert_eq!(path.hops(), 3);
        assert_eq!(path.interior(), ["city", "castle"]);
    }

    #[test]
    fn labelled_no_path_is_none() {
        let g = WeightedGraph::builder()
            .edge("a", "b", 1.0)
            .build()
            .expect("build");
        assert_eq!(shortest_path(&g, "b", "a").expect("search"), None);
    }

    #[test]
    fn single_node_path_has_no_interior() {
        let g = travel_graph().expect("build");
        let path = shortest_path(&g, "sea", "sea").expect("search").expect("path");
        assert_eq!(path.nodes, ["sea"]);
        assert_eq!(path.hops(), 0);
        assert!(path.interior().is_empty());
    }
}
