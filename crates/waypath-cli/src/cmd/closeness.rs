//! `wp closeness`: closeness centrality for every node.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypath_analytics::SearchOptions;
use waypath_analytics::metrics::{Closeness, closeness_with};
use waypath_core::WeightedGraph;

use crate::output::{OutputMode, format_distance, pretty_rule, pretty_section, render_mode};

/// Arguments for `wp closeness`.
#[derive(Args, Debug, Default)]
pub struct ClosenessArgs {
    /// Show only the N highest-ranked nodes (pretty and text output).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Report payload for `wp closeness`: one entry per node, declaration order.
#[derive(Debug, Serialize)]
pub struct ClosenessReport {
    pub nodes: Vec<Closeness>,
    #[serde(skip)]
    ranked: Vec<usize>,
}

/// Execute `wp closeness`.
///
/// # Errors
///
/// Returns the first search error hit while growing any shortest-path tree.
pub fn run_closeness(
    args: &ClosenessArgs,
    graph: &WeightedGraph,
    options: &SearchOptions,
    output: OutputMode,
) -> anyhow::Result<()> {
    let scores = closeness_with(graph, options)?;
    let nodes: Vec<Closeness> = scores.iter().cloned().collect();
    let report = ClosenessReport {
        ranked: rank(&nodes, args.top),
        nodes,
    };

    render_mode(output, &report, render_text, render_pretty)
}

/// Indices into `nodes`, highest score first, truncated to `top`.
fn rank(nodes: &[Closeness], top: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[b].score.total_cmp(&nodes[a].score));
    if let Some(top) = top {
        order.truncate(top);
    }
    order
}

fn render_text(report: &ClosenessReport, w: &mut dyn Write) -> std::io::Result<()> {
    for &i in &report.ranked {
        let c = &report.nodes[i];
        writeln!(w, "{}\t{:.6}\t{}", c.label, c.score, c.reachable)?;
    }
    Ok(())
}

fn render_pretty(report: &ClosenessReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Closeness")?;
    writeln!(
        w,
        "{:<20} {:>12} {:>10} {:>12}",
        "NODE", "SCORE", "REACHES", "TOTAL DIST"
    )?;
    pretty_rule(w)?;
    for &i in &report.ranked {
        let c = &report.nodes[i];
        writeln!(
            w,
            "{:<20} {:>12.6} {:>10} {:>12}",
            c.label,
            c.score,
            c.reachable,
            format_distance(c.total_distance)
        )?;
    }
    Ok(())
}
