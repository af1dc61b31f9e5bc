//! E2E CLI tests for `wp`.
//!
//! Each test runs the `wp` binary as a subprocess in an isolated temp
//! directory, so no stray `waypath.toml` is picked up. Tests cover text and
//! JSON output and the error contract (exit code, stderr JSON).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `wp` binary, rooted in `dir`.
fn wp_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wp").expect("wp binary must exist");
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr.
    cmd.env("WAYPATH_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

/// Run `wp` with `args` plus `--format json` and parse stdout.
fn wp_json(dir: &Path, args: &[&str]) -> Value {
    let output = wp_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("wp should not crash");
    assert!(
        output.status.success(),
        "wp {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn write_graph(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write graph file");
    path.to_string_lossy().into_owned()
}

const ISLANDS_TOML: &str = r#"
name = "islands"

[[nodes]]
name = "a"
neighbors = ["b"]

[[nodes]]
name = "b"
neighbors = ["c"]

[[nodes]]
name = "c"

[[nodes]]
name = "lonely"

[[edges]]
from = "a"
to = "b"
weight = 2

[[edges]]
from = "b"
to = "c"
weight = 3.5
"#;

// ---------------------------------------------------------------------------
// wp path
// ---------------------------------------------------------------------------

#[test]
fn path_on_builtin_map_text() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["path", "start", "treasure", "--format", "text"])
        .assert()
        .success()
        .stdout("193\tstart -> city -> castle -> treasure\n");
}

#[test]
fn path_on_builtin_map_json() {
    let dir = TempDir::new().expect("tempdir");
    let json = wp_json(dir.path(), &["path", "start", "forest"]);
    assert_eq!(json["found"], true);
    assert_eq!(json["distance"], 70.0);
    assert_eq!(json["hops"], 1);
    assert_eq!(json["path"], serde_json::json!(["start", "forest"]));
}

#[test]
fn path_to_self_is_zero() {
    let dir = TempDir::new().expect("tempdir");
    let json = wp_json(dir.path(), &["path", "cave", "cave"]);
    assert_eq!(json["distance"], 0.0);
    assert_eq!(json["path"], serde_json::json!(["cave"]));
}

#[test]
fn unreachable_target_is_not_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), "islands.toml", ISLANDS_TOML);

    let json = wp_json(dir.path(), &["--graph", &graph, "path", "a", "lonely"]);
    assert_eq!(
        json,
        serde_json::json!({ "source": "a", "target": "lonely", "found": false })
    );

    wp_cmd(dir.path())
        .args(["--graph", &graph, "path", "c", "a", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("no path"));
}

#[test]
fn fractional_weights_from_file() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), "islands.toml", ISLANDS_TOML);
    let json = wp_json(dir.path(), &["-g", &graph, "path", "a", "c"]);
    assert_eq!(json["distance"], 5.5);
    assert_eq!(json["path"], serde_json::json!(["a", "b", "c"]));
}

#[test]
fn json_graph_file_is_accepted() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(
        dir.path(),
        "pair.json",
        r#"{"nodes":[{"name":"x","neighbors":["y"]}],"edges":[{"from":"x","to":"y","weight":4}]}"#,
    );
    let json = wp_json(dir.path(), &["--graph", &graph, "path", "x", "y"]);
    assert_eq!(json["distance"], 4.0);
}

#[test]
fn unknown_node_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let output = wp_cmd(dir.path())
        .args(["path", "start", "atlantis", "--format", "json"])
        .output()
        .expect("wp should not crash");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(err["error"]["error_code"], "E2001");
    assert_eq!(err["error"]["message"], "unknown node: atlantis");
}

#[test]
fn unknown_node_text_error() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["path", "nowhere", "start", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2001]: unknown node: nowhere"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn missing_weight_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(
        dir.path(),
        "gap.toml",
        "[[nodes]]\nname = \"a\"\nneighbors = [\"b\"]\n",
    );
    let output = wp_cmd(dir.path())
        .args(["--graph", &graph, "path", "a", "b", "--json"])
        .output()
        .expect("wp should not crash");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(err["error"]["error_code"], "E2002");
}

#[test]
fn malformed_graph_file_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), "broken.toml", "[[nodes]\nname = ");
    let output = wp_cmd(dir.path())
        .args(["--graph", &graph, "stats", "--json"])
        .output()
        .expect("wp should not crash");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(err["error"]["error_code"], "E1001");
}

#[test]
fn negative_weight_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(
        dir.path(),
        "neg.toml",
        "[[edges]]\nfrom = \"a\"\nto = \"b\"\nweight = -1\n",
    );
    wp_cmd(dir.path())
        .args(["--graph", &graph, "stats", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1003"));
}

// ---------------------------------------------------------------------------
// wp betweenness / closeness
// ---------------------------------------------------------------------------

#[test]
fn betweenness_json_is_ordered_raw_tally() {
    let dir = TempDir::new().expect("tempdir");
    let output = wp_cmd(dir.path())
        .args(["betweenness", "--format", "json"])
        .output()
        .expect("wp should not crash");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    // Declaration order survives serialization.
    let start = text.find("\"start\"").expect("start");
    let treasure = text.find("\"treasure\"").expect("treasure");
    assert!(start < treasure);

    let json: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(json["normalization"], "raw");
    assert_eq!(json["total"], 228);
    assert_eq!(json["tally"]["start"], 63);
    assert_eq!(json["tally"]["city"], 50);
    assert_eq!(json["tally"]["treasure"], 0);
}

#[test]
fn betweenness_halved_and_top() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["betweenness", "--normalize", "halved", "--top", "2", "--format", "text"])
        .assert()
        .success()
        .stdout("start\t31.5000\nforest\t26.0000\n");
}

#[test]
fn betweenness_skips_unreachable_pairs() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), "islands.toml", ISLANDS_TOML);
    let json = wp_json(dir.path(), &["--graph", &graph, "betweenness"]);
    assert_eq!(json["tally"]["b"], 1);
    assert_eq!(json["tally"]["lonely"], 0);
}

#[test]
fn config_file_sets_default_normalization() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(
        dir.path().join("waypath.toml"),
        "[betweenness]\nnormalization = \"directed\"\n",
    )
    .expect("write config");
    let json = wp_json(dir.path(), &["betweenness"]);
    assert_eq!(json["normalization"], "directed");
    let start = json["scores"]["start"].as_f64().expect("score");
    assert!((start - 63.0 / 110.0).abs() < 1e-12);
}

#[test]
fn config_file_sets_output_format() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("waypath.toml"), "[output]\nformat = \"json\"\n")
        .expect("write config");
    let output = wp_cmd(dir.path())
        .args(["path", "start", "forest"])
        .output()
        .expect("wp should not crash");
    let json: Value = serde_json::from_slice(&output.stdout).expect("config selects JSON");
    assert_eq!(json["distance"], 70.0);
}

#[test]
fn broken_config_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::write(dir.path().join("waypath.toml"), "[search\n").expect("write config");
    wp_cmd(dir.path())
        .args(["stats", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn closeness_json_lists_every_node() {
    let dir = TempDir::new().expect("tempdir");
    let json = wp_json(dir.path(), &["closeness"]);
    let nodes = json["nodes"].as_array().expect("array");
    assert_eq!(nodes.len(), 12);
    assert_eq!(nodes[0]["label"], "start");
    assert_eq!(nodes[0]["reachable"], 11);
    assert_eq!(nodes[0]["total_distance"], 1227.0);
}

#[test]
fn closeness_text_is_ranked() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["closeness", "--top", "1", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("city\t"));
}

// ---------------------------------------------------------------------------
// wp stats / dot / completions
// ---------------------------------------------------------------------------

#[test]
fn stats_json_for_builtin_map() {
    let dir = TempDir::new().expect("tempdir");
    let json = wp_json(dir.path(), &["stats"]);
    assert_eq!(json["node_count"], 12);
    assert_eq!(json["edge_count"], 26);
    assert_eq!(json["scc_count"], 1);
    assert_eq!(json["total_weight"], 1418.0);
    assert!(
        json["content_hash"]
            .as_str()
            .is_some_and(|h| h.starts_with("blake3:"))
    );
}

#[test]
fn stats_text_lists_labels() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["stats", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes\t12"))
        .stdout(predicate::str::contains("labels\tstart,forest,"));
}

#[test]
fn dot_export_is_raw_in_text_mode() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["dot", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains("label = \"treasure\""));
}

#[test]
fn cypher_export_creates_every_node_and_route() {
    let dir = TempDir::new().expect("tempdir");
    let output = wp_cmd(dir.path())
        .args(["cypher", "--format", "text"])
        .output()
        .expect("wp should not crash");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.starts_with("CREATE\n  (n0:Place {name: \"start\"}),"));
    assert_eq!(text.matches(":Place ").count(), 12);
    assert_eq!(text.matches("-[:ROUTE ").count(), 26);
    assert!(text.contains("(n0)-[:ROUTE {weight: 70}]->(n1),"));
    assert!(text.trim_end().ends_with(';'));
}

#[test]
fn cypher_export_json_with_custom_names() {
    let dir = TempDir::new().expect("tempdir");
    let graph = write_graph(dir.path(), "islands.toml", ISLANDS_TOML);
    let json = wp_json(
        dir.path(),
        &["-g", &graph, "cypher", "--node-label", "PERSON", "--rel-type", "CONN"],
    );
    let cypher = json["cypher"].as_str().expect("cypher");
    assert!(cypher.contains("(n3:PERSON {name: \"lonely\"})"));
    assert!(cypher.contains("(n1)-[:CONN {weight: 3.5}]->(n2)"));
}

// ---------------------------------------------------------------------------
// --timeout-ms
// ---------------------------------------------------------------------------

#[test]
fn timeout_applies_to_each_search_in_a_tally() {
    let dir = TempDir::new().expect("tempdir");
    // 132 searches, each far below the limit.
    let json = wp_json(dir.path(), &["--timeout-ms", "250", "betweenness"]);
    assert_eq!(json["tally"]["start"], 63);
}

#[test]
fn zero_timeout_reports_deadline_code() {
    let dir = TempDir::new().expect("tempdir");
    let output = wp_cmd(dir.path())
        .args(["--timeout-ms", "0", "path", "start", "treasure", "--json"])
        .output()
        .expect("wp should not crash");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(err["error"]["error_code"], "E4002");
}

#[test]
fn completions_bash() {
    let dir = TempDir::new().expect("tempdir");
    wp_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wp"));
}
