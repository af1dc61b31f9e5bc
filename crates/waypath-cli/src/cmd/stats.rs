//! `wp stats`: structural summary of the loaded graph.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypath_core::WeightedGraph;
use waypath_core::graph::GraphStats;

use crate::output::{OutputMode, format_distance, pretty_kv, pretty_section, render_mode};

/// Arguments for `wp stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Report payload for `wp stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: GraphStats,
    /// Node labels in declaration order.
    pub nodes: Vec<String>,
}

/// Execute `wp stats`.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn run_stats(_args: &StatsArgs, graph: &WeightedGraph, output: OutputMode) -> anyhow::Result<()> {
    let report = StatsReport {
        stats: GraphStats::from_graph(graph),
        nodes: graph.labels().map(str::to_string).collect(),
    };
    render_mode(output, &report, render_stats_text, render_stats_pretty)
}

fn weight_cell(weight: Option<f64>) -> String {
    weight.map_or_else(|| "-".to_string(), format_distance)
}

fn render_stats_text(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &report.stats;
    writeln!(w, "nodes\t{}", s.node_count)?;
    writeln!(w, "edges\t{}", s.edge_count)?;
    writeln!(w, "unweighted\t{}", s.unweighted_edge_count)?;
    writeln!(w, "density\t{:.4}", s.density)?;
    writeln!(w, "scc\t{}", s.scc_count)?;
    writeln!(w, "wcc\t{}", s.weakly_connected_component_count)?;
    writeln!(w, "isolated\t{}", s.isolated_node_count)?;
    writeln!(w, "total_weight\t{}", format_distance(s.total_weight))?;
    writeln!(w, "hash\t{}", s.content_hash)?;
    writeln!(w, "labels\t{}", report.nodes.join(","))
}

fn render_stats_pretty(report: &StatsReport, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &report.stats;
    pretty_section(w, "Graph")?;
    pretty_kv(w, "Nodes", s.node_count.to_string())?;
    pretty_kv(w, "Edges", s.edge_count.to_string())?;
    pretty_kv(w, "Unweighted", s.unweighted_edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", s.density))?;
    pretty_kv(w, "Max in/out", format!("{} / {}", s.max_in_degree, s.max_out_degree))?;
    writeln!(w)?;

    pretty_section(w, "Connectivity")?;
    pretty_kv(w, "Strong comps", s.scc_count.to_string())?;
    pretty_kv(w, "Weak comps", s.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "Isolated", s.isolated_node_count.to_string())?;
    if s.is_strongly_connected() {
        writeln!(w, "Every node can reach every other node.")?;
    }
    writeln!(w)?;

    pretty_section(w, "Weights")?;
    pretty_kv(w, "Total", format_distance(s.total_weight))?;
    pretty_kv(w, "Min", weight_cell(s.min_weight))?;
    pretty_kv(w, "Max", weight_cell(s.max_weight))?;
    if !s.is_fully_weighted() {
        writeln!(
            w,
            "warning: {} adjacency entries have no weight",
            s.unweighted_edge_count
        )?;
    }
    writeln!(w)?;

    pretty_section(w, "Nodes")?;
    writeln!(w, "{}", report.nodes.join(", "))?;
    pretty_kv(w, "Hash", &s.content_hash)
}
