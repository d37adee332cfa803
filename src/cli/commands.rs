//! CLI commands and argument parsing

use crate::config::HarvestConfig;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Harvest every character, location and episode from the Rick and Morty API
#[derive(Parser, Debug)]
#[command(name = "rickmorty-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Attempts per page before giving up
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Pause between attempts, in milliseconds
    #[arg(long, global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Connect timeout per attempt, in milliseconds
    #[arg(long, global = true)]
    pub connect_timeout_ms: Option<u64>,

    /// Read timeout per attempt, in milliseconds
    #[arg(long, global = true)]
    pub read_timeout_ms: Option<u64>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch all collections and write them to JSON files
    Fetch {
        /// Directory for characters.json, locations.json and episodes.json
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the names of episodes aired in a year range
    Episodes {
        /// First year, inclusive
        #[arg(long)]
        from_year: Option<i32>,

        /// Last year, inclusive
        #[arg(long)]
        to_year: Option<i32>,
    },

    /// Fetch, write, and print the episode listing
    Run {
        /// Directory for the collection files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// First year, inclusive
        #[arg(long)]
        from_year: Option<i32>,

        /// Last year, inclusive
        #[arg(long)]
        to_year: Option<i32>,
    },
}

impl Cli {
    /// Subcommand to execute, `run` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run {
            output_dir: None,
            from_year: None,
            to_year: None,
        })
    }

    /// Load the config file (or defaults) and apply flag overrides
    pub fn resolve_config(&self) -> Result<HarvestConfig> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::load(path)?,
            None => HarvestConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(retries) = self.max_retries {
            config.http.max_retries = retries;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.http.retry_delay_ms = delay;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            config.http.connect_timeout_ms = timeout;
        }
        if let Some(timeout) = self.read_timeout_ms {
            config.http.read_timeout_ms = timeout;
        }

        let (output_dir, from_year, to_year) = match self.command() {
            Commands::Fetch { output_dir } => (output_dir, None, None),
            Commands::Episodes { from_year, to_year } => (None, from_year, to_year),
            Commands::Run {
                output_dir,
                from_year,
                to_year,
            } => (output_dir, from_year, to_year),
        };
        if let Some(dir) = output_dir {
            config.output.dir = dir;
        }
        if let Some(year) = from_year {
            config.episodes.from_year = year;
        }
        if let Some(year) = to_year {
            config.episodes.to_year = year;
        }

        config.validate()?;
        Ok(config)
    }
}
