use anyhow::{Context, Result};
use clap::Parser;
use lview_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod shutdown;

use cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lview=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    debug!("Using config: {:?}", config);

    match cli.command {
        Command::CheckData { data_folder } => {
            let folder = data_folder.unwrap_or_else(|| config.data_folder.clone());
            commands::check::run(&folder)
        }
        Command::Offsets { output, version } => {
            commands::offsets::run(&config, output.as_deref(), version.as_deref())
        }
        Command::FetchUnits { version, output } => commands::fetch::run(&version, &output),
        Command::Watch { frames, version } => {
            commands::watch::run(config, &cli.config, frames, version.as_deref())
        }
        Command::InitConfig => commands::init::run(config, &cli.config),
    }
}
