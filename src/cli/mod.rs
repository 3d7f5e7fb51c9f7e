//! CLI module
//!
//! Command-line interface for fetching paginated resources.
//!
//! # Commands
//!
//! - `fetch` - Fetch every item for an identifier and print it
//! - `validate` - Check the configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render_items, Runner};
