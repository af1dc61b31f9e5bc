//! Cypher `CREATE` export for loading a graph into a property-graph database.
//!
//! Every node becomes `(nK:<label> {name: "..."})`, with `K` its index, and
//! every adjacency entry becomes `(nU)-[:<type> {weight: W}]->(nV)`. Entries
//! without a declared weight carry no properties. Output follows node
//! declaration order and adjacency order, so equal graphs export equal text.

use std::fmt::Write;

use crate::graph::store::WeightedGraph;

/// Node label and relationship type used in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CypherNames {
    pub node_label: String,
    pub relationship: String,
}

impl Default for CypherNames {
    fn default() -> Self {
        Self {
            node_label: "Place".to_string(),
            relationship: "ROUTE".to_string(),
        }
    }
}

/// Render `graph` as a single Cypher `CREATE` statement.
///
/// An empty graph yields an empty string.
#[must_use]
pub fn to_cypher(graph: &WeightedGraph, names: &CypherNames) -> String {
    let mut patterns: Vec<String> = graph
        .node_indices()
        .map(|idx| {
            format!(
                "(n{}:{} {{name: \"{}\"}})",
                idx.index(),
                names.node_label,
                escape(graph.label(idx))
            )
        })
        .collect();

    for from in graph.node_indices() {
        for &to in graph.neighbors_of(from) {
            let props = graph
                .weight_between(from, to)
                .map(|w| format!(" {{weight: {w}}}"))
                .unwrap_or_default();
            patterns.push(format!(
                "(n{})-[:{}{props}]->(n{})",
                from.index(),
                names.relationship,
                to.index()
            ));
        }
    }

    if patterns.is_empty() {
        return String::new();
    }

    let mut out = String::from("CREATE\n");
    let last = patterns.len() - 1;
    for (i, pattern) in patterns.iter().enumerate() {
        let end = if i == last { ";" } else { "," };
        let _ = writeln!(out, "  {pattern}{end}");
    }
    out
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
