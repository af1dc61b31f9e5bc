//! Immutable directed weighted graph.
//!
//! # Overview
//!
//! A [`WeightedGraph`] is two tables built once and never mutated:
//!
//! - an **adjacency table**: for every node, the ordered list of neighbors it
//!   can step to (order is the declaration order and drives relaxation order
//!   in the search engine);
//! - a **weight table**: a positive weight per directed pair `(u, v)`.
//!
//! The two tables are independent. An adjacency entry without a weight is
//! accepted at build time and reported lazily as [`GraphError::MissingEdge`]
//! when a query actually asks for that weight.
//!
//! ## Node order
//!
//! Declared nodes come first, in declaration order. Labels that are only
//! referenced (as a neighbor or a weight endpoint) are appended afterwards in
//! first-reference order. [`NodeIndex`] values are dense: `0..node_count`.
//!
//! ## Content hash
//!
//! [`WeightedGraph::content_hash`] is a BLAKE3 hash over labels, adjacency and
//! weights. Two graphs with the same hash answer every query identically.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::instrument;

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// WeightedGraph
// ---------------------------------------------------------------------------

/// A read-only directed graph with per-edge positive weights.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    /// Structural mirror: one petgraph edge per adjacency entry, carrying the
    /// declared weight if there is one.
    graph: DiGraph<String, Option<f64>>,
    node_map: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<NodeIndex>>,
    weights: HashMap<(NodeIndex, NodeIndex), f64>,
    content_hash: String,
}

impl WeightedGraph {
    /// Start building a graph.
    #[must_use]
    pub fn builder() -> WeightedGraphBuilder {
        WeightedGraphBuilder::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of adjacency entries (directed edges that can be traversed).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node indices in declaration order.
    pub fn node_indices(&self) -> impl ExactSizeIterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Node labels in declaration order.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Look up the index of a label.
    #[must_use]
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_map.get(label).copied()
    }

    /// Look up the index of a label, failing with [`GraphError::UnknownNode`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if `label` is not in the graph.
    pub fn require(&self, label: &str) -> Result<NodeIndex, GraphError> {
        self.node_index(label)
            .ok_or_else(|| GraphError::unknown(label))
    }

    /// Label of a node.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph.
    #[must_use]
    pub fn label(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Returns `true` if `idx` belongs to this graph.
    #[must_use]
    pub fn contains(&self, idx: NodeIndex) -> bool {
        idx.index() < self.adjacency.len()
    }

    /// Ordered neighbors of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if `label` is not in the graph.
    pub fn neighbors(&self, label: &str) -> Result<impl Iterator<Item = &str> + '_, GraphError> {
        let idx = self.require(label)?;
        Ok(self.adjacency[idx.index()]
            .iter()
            .map(|&n| self.graph[n].as_str()))
    }

    /// Ordered neighbor indices of `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this graph.
    #[must_use]
    pub fn neighbors_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[idx.index()]
    }

    /// Weight of the directed edge `from -> to`, by label.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either label is absent and
    /// [`GraphError::MissingEdge`] if no weight was declared for the pair.
    pub fn weight(&self, from: &str, to: &str) -> Result<f64, GraphError> {
        let u = self.require(from)?;
        let v = self.require(to)?;
        self.weight_between(u, v)
    }

    /// Weight of the directed edge `from -> to`, by index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingEdge`] if no weight was declared for the
    /// pair.
    ///
    /// # Panics
    ///
    /// Panics if `from` has no weight and either index does not belong to
    /// this graph (the labels are needed for the error).
    pub fn weight_between(&self, from: NodeIndex, to: NodeIndex) -> Result<f64, GraphError> {
        self.weights
            .get(&(from, to))
            .copied()
            .ok_or_else(|| GraphError::MissingEdge {
                from: self.graph[from].clone(),
                to: self.graph[to].clone(),
            })
    }

    /// Adjacency entries that have no declared weight, in adjacency order.
    #[must_use]
    pub fn unweighted_edges(&self) -> Vec<(&str, &str)> {
        self.node_indices()
            .flat_map(|u| {
                self.adjacency[u.index()]
                    .iter()
                    .filter(move |&&v| !self.weights.contains_key(&(u, v)))
                    .map(move |&v| (self.label(u), self.label(v)))
            })
            .collect()
    }

    /// BLAKE3 content hash (`blake3:<hex>`) of labels, adjacency and weights.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// The petgraph view of the adjacency table.
    ///
    /// Edge weights are `None` for adjacency entries without a declared
    /// weight.
    #[must_use]
    pub fn structure(&self) -> &DiGraph<String, Option<f64>> {
        &self.graph
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects node declarations, adjacency and weights, then validates them in
/// [`WeightedGraphBuilder::build`].
///
/// The builder never fails while collecting; all errors surface from
/// `build`.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraphBuilder {
    declarations: Vec<String>,
    adjacency: Vec<(String, Vec<String>)>,
    weights: Vec<(String, String, f64)>,
}

impl WeightedGraphBuilder {
    /// Declare a node with no neighbors (yet).
    pub fn node(&mut self, label: impl Into<String>) -> &mut Self {
        let label = label.into();
        self.adjacency_entry(&label);
        self.declarations.push(label);
        self
    }

    /// Declare a node together with its ordered neighbor list.
    pub fn node_with_neighbors<I, S>(&mut self, label: impl Into<String>, neighbors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.into();
        self.adjacency_entry(&label)
            .extend(neighbors.into_iter().map(Into::into));
        self.declarations.push(label);
        self
    }

    /// Record a weight without touching adjacency.
    pub fn weight(&mut self, from: impl Into<String>, to: impl Into<String>, weight: f64) -> &mut Self {
        self.weights.push((from.into(), to.into(), weight));
        self
    }

    /// Append `to` to the adjacency of `from` and record the weight.
    pub fn edge(&mut self, from: impl Into<String>, to: impl Into<String>, weight: f64) -> &mut Self {
        let from = from.into();
        let to = to.into();
        self.adjacency_entry(&from).push(to.clone());
        self.weights.push((from, to, weight));
        self
    }

    fn adjacency_entry(&mut self, label: &str) -> &mut Vec<String> {
        let pos = match self.adjacency.iter().position(|(l, _)| l == label) {
            Some(pos) => pos,
            None => {
                self.adjacency.push((label.to_string(), Vec::new()));
                self.adjacency.len() - 1
            }
        };
        &mut self.adjacency[pos].1
    }

    /// Validate and freeze the graph.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if a label was declared twice.
    /// - [`GraphError::InvalidWeight`] if a weight is not finite or not
    ///   strictly positive.
    /// - [`GraphError::DuplicateEdge`] if a pair was weighted twice.
    #[instrument(skip(self), fields(nodes = self.declarations.len(), weights = self.weights.len()))]
    pub fn build(&self) -> Result<WeightedGraph, GraphError> {
        // Step 1: fix node order. Declared labels first, then anything that
        // is only referenced.
        let mut order: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for label in &self.declarations {
            if !seen.insert(label.as_str()) {
                return Err(GraphError::DuplicateNode {
                    label: label.clone(),
                });
            }
            order.push(label);
        }
        let referenced = self
            .adjacency
            .iter()
            .flat_map(|(src, ns)| std::iter::once(src).chain(ns))
            .chain(self.weights.iter().flat_map(|(f, t, _)| [f, t]));
        for label in referenced {
            if seen.insert(label.as_str()) {
                order.push(label);
            }
        }

        let mut graph = DiGraph::<String, Option<f64>>::with_capacity(order.len(), 0);
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(order.len());
        for label in order {
            let idx = graph.add_node(label.to_string());
            node_map.insert(label.to_string(), idx);
        }

        // Step 2: weight table.
        let mut weights: HashMap<(NodeIndex, NodeIndex), f64> =
            HashMap::with_capacity(self.weights.len());
        for (from, to, weight) in &self.weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(GraphError::InvalidWeight {
                    from: from.clone(),
                    to: to.clone(),
                    weight: *weight,
                });
            }
            let key = (node_map[from.as_str()], node_map[to.as_str()]);
            if weights.insert(key, *weight).is_some() {
                return Err(GraphError::DuplicateEdge {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        // Step 3: adjacency, indexed by node.
        let mut adjacency: Vec<Vec<NodeIndex>> = vec![Vec::new(); graph.node_count()];
        for (src, neighbors) in &self.adjacency {
            let u = node_map[src.as_str()];
            for n in neighbors {
                let v = node_map[n.as_str()];
                adjacency[u.index()].push(v);
                graph.add_edge(u, v, weights.get(&(u, v)).copied());
            }
        }

        let content_hash = compute_content_hash(&graph, &adjacency, &weights);

        Ok(WeightedGraph {
            graph,
            node_map,
            adjacency,
            weights,
            content_hash,
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compute_content_hash(
    graph: &DiGraph<String, Option<f64>>,
    adjacency: &[Vec<NodeIndex>],
    weights: &HashMap<(NodeIndex, NodeIndex), f64>,
) -> String {
    let mut hasher = blake3::Hasher::new();
    for label in graph.node_weights() {
        hasher.update(label.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (u, neighbors) in adjacency.iter().enumerate() {
        for v in neighbors {
            hasher.update(&(u as u64).to_le_bytes());
            hasher.update(&(v.index() as u64).to_le_bytes());
        }
    }
    hasher.update(b"\x01");
    let mut sorted: Vec<_> = weights.iter().collect();
    sorted.sort_unstable_by_key(|((u, v), _)| (u.index(), v.index()));
    for ((u, v), w) in sorted {
        hasher.update(&(u.index() as u64).to_le_bytes());
        hasher.update(&(v.index() as u64).to_le_bytes());
        hasher.update(&w.to_bits().to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
