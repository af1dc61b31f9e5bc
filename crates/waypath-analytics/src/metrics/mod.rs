//! Centrality metrics built on the shortest-path engine.
//!
//! - **Betweenness** (`betweenness`): how many ordered-pair shortest paths
//!   pass through each node as an interior stop.
//! - **Closeness** (`closeness`): how near each node is to everything it
//!   can reach.
//!
//! Both take a [`waypath_core::WeightedGraph`] and report scores keyed by
//! node label, in node declaration order.
//!
//! ```rust,ignore
//! use waypath_analytics::metrics::{betweenness::betweenness, closeness::closeness};
//!
//! let tally = betweenness(&graph)?;
//! let scores = closeness(&graph)?;
//! ```

pub mod betweenness;
pub mod closeness;

pub use betweenness::{BetweennessTally, betweenness, betweenness_with};
pub use closeness::{Closeness, ClosenessScores, closeness, closeness_with};
