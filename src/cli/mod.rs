//! CLI argument parsing for vocab-search
//!
//! Global flags: --endpoint, --config, --format, --quiet, --verbose,
//! --log-level, --log-json

pub mod args;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{HydrateArgs, ResolveArgs, ScopeArgs, SearchArgs};
pub use output::OutputFormat;

/// vocab-search - search and select vocabulary concepts
#[derive(Parser, Debug)]
#[command(name = "vocab-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the search and resource backends
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Configuration file (defaults to ./vocab-search.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log requests and timings
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (e.g. debug, or vocab_search_core=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search concepts, listing results followed by selected concepts
    /// outside them
    Search(SearchArgs),

    /// Resolve dataset or vocabulary aliases to canonical uris
    Resolve(ResolveArgs),

    /// Fetch the full records of selected concept uris
    Hydrate(HydrateArgs),
}
