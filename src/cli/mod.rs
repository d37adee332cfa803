//! CLI module
//!
//! Command-line interface for harvesting the API.
//!
//! # Commands
//!
//! - `fetch` - Fetch all collections and write them to JSON files
//! - `episodes` - Print the episodes aired in a year range
//! - `run` - Both of the above from a single fetch (default)

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{execute, fetch_and_save, HarvestReport, Runner};
