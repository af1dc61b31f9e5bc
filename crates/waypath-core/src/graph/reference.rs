//! Built-in reference graphs.
//!
//! - [`travel_definition`]: the twelve-location "kingdom" map, from `start`
//!   to `treasure`. Most roads are two-way with different costs each way.
//! - [`follows_definition`]: a seven-person weighted follower graph, a
//!   small DAG with one weighted detour (`Carol → Eve → Frank` is cheaper
//!   than `Carol → Dan → Frank`).

use crate::error::GraphError;
use crate::graph::definition::{EdgeDefinition, GraphDefinition, NodeDefinition};
use crate::graph::store::WeightedGraph;

const TRAVEL_NODES: &[(&str, &[&str])] = &[
    ("start", &["forest", "mountains", "sea", "city"]),
    ("forest", &["start", "mountains", "desert", "cave"]),
    ("mountains", &["start", "forest", "glacier"]),
    ("desert", &["forest"]),
    ("cave", &["forest", "inferno"]),
    ("inferno", &["cave"]),
    ("glacier", &["mountains"]),
    ("sea", &["start", "beach"]),
    ("beach", &["sea", "city"]),
    ("city", &["beach", "start", "castle"]),
    ("castle", &["city", "treasure"]),
    ("treasure", &["castle"]),
];

const TRAVEL_WEIGHTS: &[(&str, &str, f64)] = &[
    ("start", "forest", 70.0),
    ("start", "mountains", 60.0),
    ("start", "sea", 54.0),
    ("start", "city", 81.0),
    ("forest", "start", 42.0),
    ("forest", "mountains", 51.0),
    ("forest", "desert", 56.0),
    ("forest", "cave", 63.0),
    ("mountains", "start", 71.0),
    ("mountains", "forest", 38.0),
    ("mountains", "glacier", 72.0),
    ("desert", "forest", 93.0),
    ("cave", "forest", 19.0),
    ("cave", "inferno", 17.0),
    ("inferno", "cave", 71.0),
    ("glacier", "mountains", 25.0),
    ("sea", "start", 49.0),
    ("sea", "beach", 88.0),
    ("beach", "sea", 79.0),
    ("beach", "city", 29.0),
    ("city", "beach", 30.0),
    ("city", "start", 33.0),
    ("city", "castle", 36.0),
    ("castle", "city", 39.0),
    ("castle", "treasure", 76.0),
    ("treasure", "castle", 76.0),
];

const FOLLOWS_NODES: &[(&str, &[&str])] = &[
    ("Alice", &["Carol"]),
    ("Bob", &["Carol"]),
    ("Carol", &["Dan", "Eve"]),
    ("Dan", &["Frank"]),
    ("Eve", &["Frank"]),
    ("Frank", &["Gale"]),
    ("Gale", &[]),
];

const FOLLOWS_WEIGHTS: &[(&str, &str, f64)] = &[
    ("Alice", "Carol", 1.0),
    ("Bob", "Carol", 1.0),
    ("Carol", "Dan", 1.0),
    ("Carol", "Eve", 1.3),
    ("Dan", "Frank", 1.0),
    ("Eve", "Frank", 0.5),
    ("Frank", "Gale", 1.0),
];

fn definition(
    name: &str,
    nodes: &[(&str, &[&str])],
    weights: &[(&str, &str, f64)],
) -> GraphDefinition {
    GraphDefinition {
        name: Some(name.to_string()),
        nodes: nodes
            .iter()
            .map(|(n, ns)| NodeDefinition {
                name: (*n).to_string(),
                neighbors: ns.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect(),
        edges: weights
            .iter()
            .map(|(from, to, weight)| EdgeDefinition {
                from: (*from).to_string(),
                to: (*to).to_string(),
                weight: *weight,
            })
            .collect(),
    }
}

/// The kingdom travel map as a definition.
#[must_use]
pub fn travel_definition() -> GraphDefinition {
    definition("kingdom", TRAVEL_NODES, TRAVEL_WEIGHTS)
}

/// The kingdom travel map.
///
/// # Errors
///
/// Never fails for the built-in tables; the `Result` is the builder's.
pub fn travel_graph() -> Result<WeightedGraph, GraphError> {
    travel_definition().build()
}

/// The follower graph as a definition.
#[must_use]
pub fn follows_definition() -> GraphDefinition {
    definition("follows", FOLLOWS_NODES, FOLLOWS_WEIGHTS)
}

/// The follower graph.
///
/// # Errors
///
/// Never fails for the built-in tables; the `Result` is the builder's.
pub fn follows_graph() -> Result<WeightedGraph, GraphError> {
    follows_definition().build()
}
