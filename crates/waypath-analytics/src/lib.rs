#![forbid(unsafe_code)]
//! waypath-analytics library.
//!
//! Shortest paths and the centrality measures built on them:
//!
//! - [`search`]: Dijkstra with early exit at the target, lazy deletion and
//!   deterministic tie-breaking.
//! - [`path`]: predecessor-chain walk back into an ordered node sequence.
//! - [`metrics::betweenness`]: ordered-pair interior counts.
//! - [`metrics::closeness`]: reachability-scaled inverse distance sums.
//!
//! # Conventions
//!
//! - **Errors**: operations return `Result<_, waypath_core::GraphError>`; an
//!   unreachable target is [`search::SearchOutcome::NoPathFound`], not an error.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod metrics;
pub mod path;
pub mod search;

pub use path::{ShortestPath, build_path, shortest_path};
pub use search::{CancellationToken, SearchOptions, SearchOutcome, SearchResult, search};
