#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use waypath_core::ErrorCode;
use waypath_core::config::{EngineConfig, load_config};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "waypath: shortest paths and centrality over weighted graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Graph definition file (.toml or .json). Defaults to the built-in
    /// kingdom travel map.
    #[arg(short, long, global = true, value_name = "FILE")]
    graph: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Time limit for each single search, in milliseconds. Aggregations
    /// apply it to every pair or tree separately. Overrides
    /// `[search] timeout_ms` in waypath.toml.
    #[arg(long, global = true, value_name = "MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, env and config.
    fn output_mode(&self, config: Option<&EngineConfig>) -> OutputMode {
        let from_config = config.and_then(|c| c.output.format.as_deref());
        resolve_output_mode(self.format, self.json, from_config)
    }

    /// Effective per-query timeout: flag first, then config.
    fn timeout(&self, config: &EngineConfig) -> Option<Duration> {
        self.timeout_ms
            .map(Duration::from_millis)
            .or_else(|| config.search.timeout())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Query",
        about = "Shortest path between two nodes",
        long_about = "Find the cheapest route from SOURCE to TARGET. An unreachable target is reported as \"no path\" and is not an error.",
        after_help = "EXAMPLES:\n    # Route across the built-in map\n    wp path start treasure\n\n    # Query your own graph\n    wp --graph roads.toml path depot harbor\n\n    # Emit machine-readable output\n    wp path start treasure --format json"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Betweenness tally over every ordered node pair",
        long_about = "Run a shortest-path search for every ordered pair of nodes and count how often each node appears strictly inside a path.",
        after_help = "EXAMPLES:\n    # Raw ordered-pair counts\n    wp betweenness\n\n    # Classical undirected scale\n    wp betweenness --normalize halved\n\n    # Ten busiest nodes\n    wp betweenness --top 10"
    )]
    Betweenness(cmd::betweenness::BetweennessArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Closeness centrality for every node",
        long_about = "Score each node by how near it is to the nodes it can reach: reachable count divided by the sum of distances.",
        after_help = "EXAMPLES:\n    # All nodes, best first\n    wp closeness\n\n    # Emit machine-readable output\n    wp closeness --format json"
    )]
    Closeness(cmd::closeness::ClosenessArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Structural summary of the graph",
        after_help = "EXAMPLES:\n    # Summarize the built-in map\n    wp stats\n\n    # Check a graph file before querying it\n    wp --graph roads.toml stats"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Export the graph as Graphviz DOT",
        after_help = "EXAMPLES:\n    # Render to SVG\n    wp dot | dot -Tsvg > map.svg"
    )]
    Dot(cmd::dot::DotArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Export the graph as a Cypher CREATE statement",
        after_help = "EXAMPLES:\n    # Load the built-in map into Neo4j\n    wp cypher | cypher-shell\n\n    # Choose the node label and relationship type\n    wp cypher --node-label PERSON --rel-type CONN"
    )]
    Cypher(cmd::cypher::CypherArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    wp completions bash\n\n    # Generate zsh completions\n    wp completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("WAYPATH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "waypath=debug,wp=debug,info"
        } else {
            "waypath=info,warn"
        })
    });

    let format = env::var("WAYPATH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(ref args) = cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let graph = cmd::load_graph(cli.graph.as_deref())?;
    let options = cmd::search_options(cli.timeout(config));
    debug!(timeout = ?options.timeout, "search options");

    match cli.command {
        Commands::Path(ref args) => cmd::path::run_path(args, &graph, &options, output),
        Commands::Betweenness(ref args) => cmd::betweenness::run_betweenness(
            args,
            config.betweenness.normalization,
            &graph,
            &options,
            output,
        ),
        Commands::Closeness(ref args) => {
            cmd::closeness::run_closeness(args, &graph, &options, output)
        }
        Commands::Stats(ref args) => cmd::stats::run_stats(args, &graph, output),
        Commands::Dot(ref args) => cmd::dot::run_dot(args, &graph, output),
        Commands::Cypher(ref args) => cmd::cypher::run_cypher(args, &graph, output),
        Commands::Completions(_) => Ok(()),
    }
}

fn report(output: OutputMode, err: &anyhow::Error) {
    let cli_error = CliError::from_anyhow(err);
    if render_error(output, &cli_error).is_err() {
        eprintln!("error: {}", cli_error.message);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = env::current_dir()
        .context("Failed to resolve working directory")
        .and_then(|dir| load_config(&dir).context(ErrorCode::ConfigParseError));
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            report(cli.output_mode(None), &err);
            return ExitCode::FAILURE;
        }
    };

    let output = cli.output_mode(Some(&config));
    match run(&cli, &config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            report(output, &err);
            ExitCode::FAILURE
        }
    }
}
