//! edgescope CLI - inspect large edge-list graphs from the shell.
//!
//! Usage:
//!   edgescope <path> stats                  # Counts, degree summary, memory
//!   edgescope <path> degree <id>            # Degree of one node
//!   edgescope <path> neighbors <id>         # Neighbor list of one node
//!   edgescope <path> bfs <start> -d 2       # Nodes within depth hops
//!   edgescope <path> max-degree             # Highest-degree node
//!
//! Logs go to stderr; set `RUST_LOG=debug` for per-query timings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edgescope::{GraphSession, LoadOptions};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "edgescope")]
#[command(about = "Degree, neighbor and bounded-BFS queries over edge-list graphs", long_about = None)]
struct Cli {
    /// Edge-list file: one `u v` pair per line
    path: PathBuf,

    /// Lines starting with this character are ignored
    #[arg(short, long, default_value_t = '#')]
    comment: char,

    /// Sort neighbor lists ascending (stable output across input orderings)
    #[arg(short, long)]
    sorted: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts, degree summary and estimated memory
    Stats,

    /// Degree of a node
    Degree {
        /// Node id
        #[arg(allow_hyphen_values = true)]
        node: i64,
    },

    /// Neighbors of a node in build order
    Neighbors {
        /// Node id
        #[arg(allow_hyphen_values = true)]
        node: i64,
    },

    /// Nodes reachable within a hop limit, in discovery order
    Bfs {
        /// Start node id
        #[arg(allow_hyphen_values = true)]
        start: i64,

        /// Maximum number of hops
        #[arg(short, long, default_value = "2")]
        depth: u32,

        /// Print `node distance` pairs instead of bare ids
        #[arg(long)]
        with_depths: bool,
    },

    /// Node with the highest degree (smallest id on ties)
    MaxDegree,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = LoadOptions::new()
        .comment_prefix(cli.comment)
        .sort_neighbors(cli.sorted);
    let mut session = GraphSession::with_options(options);

    let started = Instant::now();
    session
        .load(&cli.path)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;
    info!(elapsed_ms = started.elapsed().as_millis(), "ready");

    match cli.command {
        Commands::Stats => {
            let graph = session.graph()?;
            println!("nodes:      {}", graph.node_count());
            println!("edges:      {}", graph.edge_count());
            #[allow(clippy::cast_precision_loss)]
            let mib = graph.store().memory_bytes() as f64 / (1024.0 * 1024.0);
            println!("memory:     {mib:.2} MiB");
            if let Ok(stats) = graph.degree_stats() {
                println!("degree min: {}", stats.min);
                println!("degree max: {}", stats.max);
                println!("degree avg: {:.3}", stats.mean);
                println!("isolated:   {}", stats.isolated);
            }
        }
        Commands::Degree { node } => {
            println!("{}", session.degree(node)?);
        }
        Commands::Neighbors { node } => {
            print_ids(session.neighbors(node)?);
        }
        Commands::Bfs {
            start,
            depth,
            with_depths,
        } => {
            if with_depths {
                for (node, distance) in session.bfs_with_depths(start, depth)? {
                    println!("{node} {distance}");
                }
            } else {
                print_ids(&session.bfs(start, depth)?);
            }
        }
        Commands::MaxDegree => {
            let node = session.max_degree_node()?;
            let degree = session.degree(i64::from(node))?;
            println!("{node} (degree {degree})");
        }
    }

    Ok(())
}

fn print_ids(ids: &[u32]) {
    let line: Vec<String> = ids.iter().map(u32::to_string).collect();
    println!("{}", line.join(" "));
}
