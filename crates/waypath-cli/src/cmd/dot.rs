//! `wp dot`: Graphviz export of the loaded graph.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypath_core::WeightedGraph;
use waypath_core::graph::dot::to_dot;

use crate::output::{OutputMode, render};

/// Arguments for `wp dot`.
#[derive(Args, Debug, Default)]
pub struct DotArgs {}

#[derive(Debug, Serialize)]
struct DotReport {
    content_hash: String,
    dot: String,
}

/// Execute `wp dot`.
///
/// Pretty and text modes print the DOT source as-is so it can be piped into
/// `dot -Tsvg`. JSON mode wraps it in an object.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_dot(_args: &DotArgs, graph: &WeightedGraph, output: OutputMode) -> anyhow::Result<()> {
    let report = DotReport {
        content_hash: graph.content_hash().to_string(),
        dot: to_dot(graph),
    };
    render(output, &report, |r, w| write!(w, "{}", r.dot))
}
