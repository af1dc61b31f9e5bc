//! `wp cypher`: Cypher `CREATE` export of the loaded graph.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypath_core::WeightedGraph;
use waypath_core::graph::cypher::{CypherNames, to_cypher};

use crate::output::{OutputMode, render};

/// Arguments for `wp cypher`.
#[derive(Args, Debug)]
pub struct CypherArgs {
    /// Label given to every node.
    #[arg(long, value_name = "LABEL", default_value = "Place")]
    pub node_label: String,

    /// Type given to every relationship.
    #[arg(long = "rel-type", value_name = "TYPE", default_value = "ROUTE")]
    pub relationship: String,
}

#[derive(Debug, Serialize)]
struct CypherReport {
    content_hash: String,
    cypher: String,
}

/// Execute `wp cypher`.
///
/// Pretty and text modes print the statement as-is so it can be piped into
/// `cypher-shell`. JSON mode wraps it in an object.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_cypher(args: &CypherArgs, graph: &WeightedGraph, output: OutputMode) -> anyhow::Result<()> {
    let names = CypherNames {
        node_label: args.node_label.clone(),
        relationship: args.relationship.clone(),
    };
    let report = CypherReport {
        content_hash: graph.content_hash().to_string(),
        cypher: to_cypher(graph, &names),
    };
    render(output, &report, |r, w| write!(w, "{}", r.cypher))
}
