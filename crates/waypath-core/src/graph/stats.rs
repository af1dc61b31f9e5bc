//! Basic statistics for a weighted graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: nodes and adjacency entries.
//! - **unweighted_edge_count**: adjacency entries with no declared weight.
//!   Any value above zero means some searches will fail with a missing-edge
//!   error.
//! - **density**: `edge_count / (node_count * (node_count - 1))`. Zero for
//!   graphs with 0 or 1 node.
//! - **scc_count**: number of strongly connected components. Equal to
//!   `node_count` when no node can reach itself through another.
//! - **weakly_connected_component_count**: components of the graph viewed
//!   as undirected. Above 1 means some pairs can never reach each other in
//!   either direction.
//! - **isolated_node_count**: nodes with neither in- nor out-edges.
//! - **max_in_degree** / **max_out_degree**.
//! - **total_weight**, **min_weight**, **max_weight** over declared weights
//!   of adjacency entries.

use petgraph::{
    Direction,
    algo::{connected_components, kosaraju_scc},
    graph::NodeIndex,
    visit::IntoNodeIdentifiers,
};
use serde::Serialize;

use crate::graph::store::WeightedGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a [`WeightedGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub unweighted_edge_count: usize,
    pub density: f64,
    pub scc_count: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub total_weight: f64,
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    /// BLAKE3 content hash of the graph.
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &WeightedGraph) -> Self {
        let g = graph.structure();
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let weights: Vec<f64> = g.edge_weights().filter_map(|w| *w).collect();
        let unweighted_edge_count = edge_count - weights.len();
        let total_weight: f64 = weights.iter().sum();
        let min_weight = weights.iter().copied().reduce(f64::min);
        let max_weight = weights.iter().copied().reduce(f64::max);

        let scc_count = kosaraju_scc(g).len();
        let wcc = connected_components(g);

        let degree = |idx: NodeIndex, dir: Direction| g.neighbors_directed(idx, dir).count();

        let isolated_node_count = g
            .node_identifiers()
            .filter(|&idx| {
                degree(idx, Direction::Incoming) == 0 && degree(idx, Direction::Outgoing) == 0
            })
            .count();

        let max_in_degree = g
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Incoming))
            .max()
            .unwrap_or(0);

        let max_out_degree = g
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Outgoing))
            .max()
            .unwrap_or(0);

        Self {
            node_count,
            edge_count,
            unweighted_edge_count,
            density: compute_density(node_count, edge_count),
            scc_count,
            weakly_connected_component_count: wcc,
            isolated_node_count,
            max_in_degree,
            max_out_degree,
            total_weight,
            min_weight,
            max_weight,
            content_hash: graph.content_hash().to_string(),
        }
    }

    /// Return `true` if every node can reach every other node.
    #[must_use]
    pub const fn is_strongly_connected(&self) -> bool {
        self.scc_count == 1
    }

    /// Return `true` if every adjacency entry has a weight.
    #[must_use]
    pub const fn is_fully_weighted(&self) -> bool {
        self.unweighted_edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
