//! `wp path`: single shortest-path query.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use waypath_analytics::path::shortest_path_with;
use waypath_analytics::SearchOptions;
use waypath_core::WeightedGraph;

use crate::output::{OutputMode, format_distance, pretty_kv, pretty_section, render_mode};

/// Arguments for `wp path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Node the path starts from.
    pub source: String,

    /// Node the path ends at.
    pub target: String,
}

/// Report payload for `wp path`.
///
/// An unreachable target is a successful query: `found` is `false` and the
/// path fields are omitted.
#[derive(Debug, Serialize)]
pub struct PathReport {
    pub source: String,
    pub target: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

/// Execute `wp path`.
///
/// # Errors
///
/// Returns the search error (unknown label, missing weight, deadline).
pub fn run_path(
    args: &PathArgs,
    graph: &WeightedGraph,
    options: &SearchOptions,
    output: OutputMode,
) -> anyhow::Result<()> {
    let found = shortest_path_with(graph, &args.source, &args.target, options)?;

    let report = PathReport {
        source: args.source.clone(),
        target: args.target.clone(),
        found: found.is_some(),
        distance: found.as_ref().map(|p| p.distance),
        hops: found.as_ref().map(waypath_analytics::ShortestPath::hops),
        path: found.map(|p| p.nodes),
    };

    render_mode(output, &report, render_path_text, render_path_pretty)
}

fn render_path_text(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    match (&report.path, report.distance) {
        (Some(path), Some(distance)) => {
            writeln!(w, "{}\t{}", format_distance(distance), path.join(" -> "))
        }
        _ => writeln!(w, "no path\t{} -> {}", report.source, report.target),
    }
}

fn render_path_pretty(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Route {} → {}", report.source, report.target))?;
    match (&report.path, report.distance) {
        (Some(path), Some(distance)) => {
            pretty_kv(w, "Distance", format_distance(distance))?;
            pretty_kv(w, "Hops", report.hops.unwrap_or_default().to_string())?;
            writeln!(w)?;
            for (i, node) in path.iter().enumerate() {
                writeln!(w, "  {:>2}. {node}", i + 1)?;
            }
            Ok(())
        }
        _ => writeln!(
            w,
            "No path: {} cannot be reached from {}.",
            report.target, report.source
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(found: bool) -> PathReport {
        PathReport {
            source: "start".into(),
            target: "forest".into(),
            found,
            distance: found.then_some(70.0),
            hops: found.then_some(1),
            path: found.then(|| vec!["start".into(), "forest".into()]),
        }
    }

    #[test]
    fn text_line_has_distance_then_path() {
        let mut buf = Vec::new();
        render_path_text(&report(true), &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "70\tstart -> forest\n");
    }

    #[test]
    fn text_line_for_no_path() {
        let mut buf = Vec::new();
        render_path_text(&report(false), &mut buf).expect("render");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "no path\tstart -> forest\n");
    }

    #[test]
    fn json_omits_path_fields_when_not_found() {
        let json = serde_json::to_value(report(false)).expect("json");
        assert_eq!(
            json,
            serde_json::json!({ "source": "start", "target": "forest", "found": false })
        );
    }

    #[test]
    fn pretty_lists_every_stop() {
        let mut buf = Vec::new();
        render_path_pretty(&report(true), &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Route start → forest"));
        assert!(text.contains("1. start"));
        assert!(text.contains("2. forest"));
    }
}
