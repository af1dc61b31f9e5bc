//! Graphviz DOT export.
//!
//! Nodes are labelled with their names, edges with their weights. Adjacency
//! entries without a declared weight are drawn dashed and unlabelled.

use petgraph::dot::{Config, Dot};

use crate::graph::store::WeightedGraph;

/// Render `graph` as a DOT `digraph`.
#[must_use]
pub fn to_dot(graph: &WeightedGraph) -> String {
    let dot = Dot::with_attr_getters(
        graph.structure(),
        &[Config::NodeNoLabel, Config::EdgeNoLabel],
        &|_, edge| match edge.weight() {
            Some(w) => format!("label = \"{w}\""),
            None => "style = dashed".to_string(),
        },
        &|_, (_, label)| format!("label = \"{}\"", escape(label)),
    );
    // `Option<f64>` edge weights only implement Debug.
    format!("{dot:?}")
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
