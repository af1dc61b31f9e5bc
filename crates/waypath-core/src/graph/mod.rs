//! Graph store for path queries.
//!
//! # Overview
//!
//! Graphs are built once from an explicit definition and never change
//! afterwards, so any number of queries can share a `&WeightedGraph`.
//!
//! ## Pipeline
//!
//! ```text
//! graph file (TOML / JSON)          reference::travel_definition()
//!        ↓  definition::GraphDefinition::load()      ↓
//! GraphDefinition ───────────────────────────────────┘
//!        ↓  GraphDefinition::build()
//! WeightedGraph  (adjacency + weight table, BLAKE3 content hash)
//!        ├─ stats::GraphStats::from_graph()
//!        ├─ dot::to_dot()
//!        └─ cypher::to_cypher()
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use waypath_core::graph::{definition::GraphDefinition, stats::GraphStats};
//!
//! let graph = GraphDefinition::load(path)?.build()?;
//! let stats = GraphStats::from_graph(&graph);
//! println!("nodes={} edges={}", stats.node_count, stats.edge_count);
//! ```

pub mod cypher;
pub mod definition;
pub mod dot;
pub mod reference;
pub mod stats;
pub mod store;

// Re-export primary types at module level for convenience.
pub use definition::GraphDefinition;
pub use petgraph::graph::NodeIndex;
pub use stats::GraphStats;
pub use store::{WeightedGraph, WeightedGraphBuilder};
