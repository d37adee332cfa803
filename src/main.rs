//! rickmorty-harvest CLI
//!
//! Fetches every collection and writes it to disk

use clap::Parser;
use rickmorty_harvest::cli::{Cli, Runner};
use rickmorty_harvest::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
