//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch every page of a paginated API resource
#[derive(Parser, Debug)]
#[command(name = "page-aggregator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all items for an identifier
    Fetch {
        /// Identifier of the parent resource (e.g. a sale id)
        identifier: String,

        /// API base URL, overrides the config file
        #[arg(long)]
        base_url: Option<String>,

        /// Items per page, overrides the config file
        #[arg(long)]
        page_size: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Validate the configuration and print the effective values
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Pretty-printed JSON array
    Pretty,
}
