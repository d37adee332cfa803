//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::collections::CollectionClient;
use crate::config::HarvestConfig;
use crate::error::{Error, Result};
use crate::output::{episodes_aired_between, render_episode_listing, save_collection};
use crate::pagination::PageSource;
use crate::types::{Collection, Record};
use futures::future::join_all;
use std::io::Write;
use std::time::Instant;
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.cli.resolve_config()?;
        let client = CollectionClient::new(config.http_client_config())?;

        let mut stdout = std::io::stdout();
        let outcome = execute(&self.cli.command(), &client, &config, &mut stdout).await;

        client.close();
        outcome
    }
}

/// What a fetch-and-save pass produced
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Episodes, when that collection was fetched
    pub episodes: Option<Vec<Record>>,
    /// Collections that could not be fetched, with the reason
    pub failed: Vec<(Collection, Error)>,
}

impl HarvestReport {
    /// Error naming each failed collection with its endpoint and page,
    /// if there are any
    pub fn into_result(self) -> Result<()> {
        if self.failed.is_empty() {
            return Ok(());
        }
        let reasons: Vec<String> = self
            .failed
            .iter()
            .map(|(collection, err)| format!("{collection}: {err}"))
            .collect();
        Err(Error::Other(format!("Could not fetch {}", reasons.join("; "))))
    }
}

/// Execute one command against `client`, printing listings to `out`
pub async fn execute<S, W>(
    command: &Commands,
    client: &CollectionClient<S>,
    config: &HarvestConfig,
    out: &mut W,
) -> Result<()>
where
    S: PageSource,
    W: Write,
{
    let start = Instant::now();

    let outcome = match command {
        Commands::Fetch { .. } => fetch_and_save(client, config).await?.into_result(),
        Commands::Episodes { .. } => {
            let episodes = client.fetch_all_episodes().await?;
            print_episodes(config, &episodes, out)
        }
        Commands::Run { .. } => {
            let mut report = fetch_and_save(client, config).await?;
            if let Some(episodes) = report.episodes.take() {
                print_episodes(config, &episodes, out)?;
            }
            report.into_result()
        }
    };

    info!("Finished in {:.2}s", start.elapsed().as_secs_f64());
    outcome
}

/// Fetch all three collections and write every one that succeeded.
///
/// Collection failures are logged and listed in the report; only a failed
/// file write is returned as an error.
pub async fn fetch_and_save<S: PageSource>(
    client: &CollectionClient<S>,
    config: &HarvestConfig,
) -> Result<HarvestReport> {
    let results = client.fetch_every_collection().await;

    let mut report = HarvestReport::default();
    let mut writes = Vec::new();

    for (collection, result) in results.by_collection() {
        match result {
            Ok(records) => {
                if collection == Collection::Episodes {
                    report.episodes = Some(records.clone());
                }
                writes.push(save_collection(&config.output.dir, collection, records));
            }
            Err(e) => {
                error!("Failed to fetch {collection}: {e}");
                report.failed.push((collection, e));
            }
        }
    }

    for written in join_all(writes).await {
        written?;
    }

    Ok(report)
}

fn print_episodes<W: Write>(config: &HarvestConfig, episodes: &[Record], out: &mut W) -> Result<()> {
    let range = config.year_range()?;
    let names = episodes_aired_between(episodes, range);
    out.write_all(render_episode_listing(range, &names).as_bytes())?;
    Ok(())
}
