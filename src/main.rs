mod api;
mod cli;
mod commands;
mod components;
mod config;
mod error;
mod shutdown;
mod startup;
mod utils;

use clap::Parser;
use cli::Cli;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging()?;

    info!("Starting workmate");

    // Load configuration
    let config = startup::load_config().await?;

    // Run the requested command
    startup::run(cli, config).await
}
