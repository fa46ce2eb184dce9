//! Command-line interface for stars-graph
//!
//! Subcommands cover the whole offline flow: classify a dump of starred
//! repositories, inspect why a record got its label, repair descriptions in
//! an exported data file, and build the graph view model from it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod categories;
mod classify;
mod clean;
mod explain;
mod graph;
mod utils;

/// Classify starred repositories into topical categories
#[derive(Parser)]
#[command(name = "stars-graph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (stars-graph.toml or .stars-graph.yml)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify repository records and emit the exported data file
    Classify(classify::ClassifyArgs),

    /// Show the per-category score breakdown behind each label
    Explain(explain::ExplainArgs),

    /// Repair corrupted descriptions in an exported data file
    Clean(clean::CleanArgs),

    /// Build the filtered graph view model from an exported data file
    Graph(graph::GraphArgs),

    /// List the categories of the active rule table
    Categories(categories::CategoriesArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Classify(args) => classify::run(args, config),
        Commands::Explain(args) => explain::run(args, config),
        Commands::Clean(args) => clean::run(args),
        Commands::Graph(args) => graph::run(args, config),
        Commands::Categories(args) => categories::run(args, config),
    }
}
