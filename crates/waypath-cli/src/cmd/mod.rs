//! Subcommand handlers.
//!
//! Each handler takes its parsed arguments, the loaded graph and the
//! resolved [`crate::output::OutputMode`], and returns `anyhow::Result<()>`.
//! Errors are rendered once, in `main`.

pub mod betweenness;
pub mod closeness;
pub mod completions;
pub mod cypher;
pub mod dot;
pub mod path;
pub mod stats;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;
use waypath_analytics::SearchOptions;
use waypath_core::graph::reference;
use waypath_core::{ErrorCode, GraphDefinition, WeightedGraph};

/// Load the graph from `path`, or build the reference travel map when no
/// file is given.
///
/// # Errors
///
/// Returns an error tagged [`ErrorCode::DefinitionParseError`] if the file
/// cannot be read or parsed, or the builder's [`waypath_core::GraphError`]
/// if the definition is invalid.
pub fn load_graph(path: Option<&Path>) -> Result<WeightedGraph> {
    let definition = match path {
        Some(path) => GraphDefinition::load(path).context(ErrorCode::DefinitionParseError)?,
        None => reference::travel_definition(),
    };
    let graph = definition.build()?;
    debug!(
        name = definition.name.as_deref().unwrap_or("unnamed"),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        hash = graph.content_hash(),
        "graph ready"
    );
    Ok(graph)
}

/// Search options carrying the effective per-query timeout.
pub fn search_options(timeout: Option<Duration>) -> SearchOptions {
    timeout.map_or_else(SearchOptions::default, SearchOptions::with_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_loads_reference_graph() {
        let g = load_graph(None).expect("reference graph");
        assert_eq!(g.node_count(), 12);
        assert!(g.node_index("treasure").is_some());
    }

    #[test]
    fn unreadable_file_is_tagged_as_definition_error() {
        let err = load_graph(Some(Path::new("/definitely/not/here.toml"))).expect_err("missing");
        assert_eq!(err.downcast_ref::<ErrorCode>(), Some(&ErrorCode::DefinitionParseError));
    }

    #[test]
    fn timeout_is_kept_per_query() {
        assert!(search_options(None).timeout.is_none());

        let options = search_options(Some(Duration::from_secs(1)));
        assert_eq!(options.timeout, Some(Duration::from_secs(1)));
        assert!(options.deadline.is_none());
    }
}
