//! `wp betweenness`: ordered-pair interior tally for every node.

use std::io::Write;

use clap::{Args, ValueEnum};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use waypath_analytics::SearchOptions;
use waypath_analytics::metrics::{BetweennessTally, betweenness_with};
use waypath_core::WeightedGraph;
use waypath_core::config::Normalization;

use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `wp betweenness`.
#[derive(Args, Debug, Default)]
pub struct BetweennessArgs {
    /// Scaling applied to raw counts. Defaults to `[betweenness]
    /// normalization` from waypath.toml, then `raw`.
    #[arg(long, value_enum)]
    pub normalize: Option<NormalizeArg>,

    /// Show only the N highest-ranked nodes (pretty and text output).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// `--normalize` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalizeArg {
    /// Ordered-pair counts as tallied.
    Raw,
    /// Counts divided by 2.
    Halved,
    /// Counts divided by (n-1)(n-2).
    Directed,
}

impl From<NormalizeArg> for Normalization {
    fn from(arg: NormalizeArg) -> Self {
        match arg {
            NormalizeArg::Raw => Self::Raw,
            NormalizeArg::Halved => Self::Halved,
            NormalizeArg::Directed => Self::Directed,
        }
    }
}

/// Report payload for `wp betweenness`.
#[derive(Debug, Serialize)]
pub struct BetweennessReport<'a> {
    pub normalization: Normalization,
    pub total: u64,
    /// Raw counts, node → count in declaration order.
    pub tally: &'a BetweennessTally,
    /// Normalized scores, node → score in declaration order.
    pub scores: OrderedScores<'a>,
    #[serde(skip)]
    top: Option<usize>,
}

/// Label/score pairs serialized as a JSON object that keeps their order.
#[derive(Debug)]
pub struct OrderedScores<'a>(Vec<(&'a str, f64)>);

impl Serialize for OrderedScores<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, score) in &self.0 {
            map.serialize_entry(label, score)?;
        }
        map.end()
    }
}

/// Execute `wp betweenness`.
///
/// # Errors
///
/// Returns the first search error other than an unreachable pair.
pub fn run_betweenness(
    args: &BetweennessArgs,
    default_normalization: Normalization,
    graph: &WeightedGraph,
    options: &SearchOptions,
    output: OutputMode,
) -> anyhow::Result<()> {
    let normalization = args.normalize.map_or(default_normalization, Normalization::from);
    let tally = betweenness_with(graph, options)?;

    let report = BetweennessReport {
        normalization,
        total: tally.total(),
        tally: &tally,
        scores: OrderedScores(tally.normalized(normalization)),
        top: args.top,
    };

    render_mode(output, &report, render_text, render_pretty)
}

/// Rows sorted by raw count (highest first), truncated to `--top`.
fn ranked_rows<'a>(report: &'a BetweennessReport<'_>) -> Vec<(&'a str, u64, f64)> {
    let mut rows: Vec<(&str, u64, f64)> = report
        .tally
        .iter()
        .zip(&report.scores.0)
        .map(|((label, count), (_, score))| (label, count, *score))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(top) = report.top {
        rows.truncate(top);
    }
    rows
}

fn score_cell(normalization: Normalization, count: u64, score: f64) -> String {
    match normalization {
        Normalization::Raw => count.to_string(),
        Normalization::Halved | Normalization::Directed => format!("{score:.4}"),
    }
}

fn render_text(report: &BetweennessReport<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    for (label, count, score) in ranked_rows(report) {
        writeln!(w, "{label}\t{}", score_cell(report.normalization, count, score))?;
    }
    Ok(())
}

fn render_pretty(report: &BetweennessReport<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Betweenness")?;
    pretty_kv(w, "Nodes", report.tally.len().to_string())?;
    pretty_kv(w, "Normalization", format!("{:?}", report.normalization).to_lowercase())?;
    pretty_kv(w, "Interior visits", report.total.to_string())?;
    writeln!(w)?;
    writeln!(w, "{:<24} {:>10}", "NODE", "SCORE")?;
    pretty_rule(w)?;
    for (label, count, score) in ranked_rows(report) {
        writeln!(
            w,
            "{label:<24} {:>10}",
            score_cell(report.normalization, count, score)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_analytics::metrics::betweenness;

    fn chain() -> WeightedGraph {
        WeightedGraph::builder()
            .edge("a", "b", 1.0)
            .edge("b", "c", 1.0)
            .edge("c", "d", 1.0)
            .build()
            .expect("build")
    }

    #[test]
    fn normalize_arg_maps_to_config_enum() {
        assert_eq!(Normalization::from(NormalizeArg::Halved), Normalization::Halved);
        assert_eq!(Normalization::from(NormalizeArg::Directed), Normalization::Directed);
    }

    #[test]
    fn json_keeps_declaration_order() {
        let g = chain();
        let tally = betweenness(&g).expect("tally");
        let report = BetweennessReport {
            normalization: Normalization::Halved,
            total: tally.total(),
            tally: &tally,
            scores: OrderedScores(tally.normalized(Normalization::Halved)),
            top: None,
        };
        let json = serde_json::to_string(&report).expect("json");
        assert_eq!(
            json,
            r#"{"normalization":"halved","total":4,"tally":{"a":0,"b":2,"c":2,"d":0},"scores":{"a":0.0,"b":1.0,"c":1.0,"d":0.0}}"#
        );
    }

    #[test]
    fn text_rows_are_ranked_and_truncated() {
        let g = chain();
        let tally = betweenness(&g).expect("tally");
        let report = BetweennessReport {
            normalization: Normalization::Raw,
            total: tally.total(),
            tally: &tally,
            scores: OrderedScores(tally.normalized(Normalization::Raw)),
            top: Some(2),
        };
        let mut buf = Vec::new();
        render_text(&report, &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "b\t2\nc\t2\n");
    }
}
