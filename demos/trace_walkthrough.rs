//! Runs one algorithm on a small built-in graph or tree and prints its
//! trace step by step, the way a player would replay it.
//!
//! ```text
//! cargo run --example trace_walkthrough -- dijkstra --start A
//! cargo run --example trace_walkthrough -- kruskal --variant undirected
//! cargo run --example trace_walkthrough -- inorder
//! ```

use std::{process::ExitCode, str::FromStr};

use clap::{Parser, ValueEnum};
use tracegraph::{
    prelude::*,
    tracing_support::{LevelFilter, init_stderr_tracing},
};

/// Graph variant selector for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    Directed,
    Undirected,
}

/// Replay the trace of a graph or tree algorithm
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Algorithm to run, e.g. bfs, dijkstra, kruskal, preorder, all_descendants
    #[arg(value_parser = AlgorithmKind::from_str)]
    algorithm: AlgorithmKind,

    /// Start node (graph searches require one; tree algorithms default to
    /// the root)
    #[arg(short, long)]
    start: Option<String>,

    /// Graph variant for graph algorithms (ignored for tree algorithms)
    #[arg(long, value_enum, default_value_t = Variant::Directed)]
    variant: Variant,

    /// Log mutations and algorithm spans to stderr
    #[arg(short, long)]
    verbose: bool,
}

const SAMPLE_EDGES: [(&str, &str, f64); 7] = [
    ("A", "B", 4.0),
    ("A", "C", 1.0),
    ("C", "B", 2.0),
    ("B", "D", 1.0),
    ("C", "D", 5.0),
    ("D", "E", 3.0),
    ("E", "F", 1.0),
];

fn sample_graph<D: tracegraph::Directedness>() -> tracegraph::Result<GenericGraph<String, D>> {
    let mut graph = GenericGraph::new();
    for id in ["A", "B", "C", "D", "E", "F"] {
        graph.add_node(id.to_string())?;
    }
    for (source, target, weight) in SAMPLE_EDGES {
        graph.add_edge(Edge::weighted(source.to_string(), target.to_string(), weight))?;
    }
    Ok(graph)
}

/// ```text
///        M
///       / \
///      F   T
///     / \   \
///    B   H   W
/// ```
fn sample_tree() -> tracegraph::Result<BinaryTree<String>> {
    let mut tree = BinaryTree::new();
    for id in ["M", "F", "T", "B", "H", "W"] {
        tree.add_node(id.to_string())?;
    }
    for (parent, child, side) in [
        ("M", "F", Side::Left),
        ("M", "T", Side::Right),
        ("F", "B", Side::Left),
        ("F", "H", Side::Right),
        ("T", "W", Side::Right),
    ] {
        tree.add_child(&parent.to_string(), &child.to_string(), side)?;
    }
    tree.search_root()?;
    Ok(tree)
}

fn run(args: &Args) -> tracegraph::Result<()> {
    let model: GraphModel<String> = if args.algorithm.is_tree_algorithm() {
        let tree = sample_tree()?;
        println!("tree: {}", tree.bracket_form());
        tree.into()
    } else {
        match args.variant {
            Variant::Directed => sample_graph::<Directed>()?.into(),
            Variant::Undirected => sample_graph::<Undirected>()?.into(),
        }
    };
    println!(
        "{} with {} nodes and {} edges",
        model.variant_name(),
        model.num_nodes(),
        model.num_edges()
    );

    let trace = model.run_algorithm(args.algorithm, args.start.as_ref())?;
    println!("{} ({} steps)", trace.kind(), trace.len());
    for (i, step) in trace.steps().iter().enumerate() {
        let action = match &step.step {
            Step::Visit { from: Some(from), to } => format!("visit {from} -> {to}"),
            Step::Visit { from: None, to } => format!("visit {to}"),
            Step::Unmark { nodes } => format!("unmark {}", nodes.join(" - ")),
            Step::Annotate { message } => format!("note {message}"),
        };
        println!("{:>3}. {:<24} | {}", i + 1, action, step.log);
    }
    for line in trace.summary() {
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.verbose {
        init_stderr_tracing(LevelFilter::DEBUG);
    }
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
