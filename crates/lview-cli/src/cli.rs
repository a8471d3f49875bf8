use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lview_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "lview", version)]
#[command(about = "Memory-reading overlay for League of Legends")]
pub struct Cli {
    /// Config file (missing file means defaults)
    #[arg(short, long, global = true, env = "LVIEW_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the data folder and report what was found
    CheckData {
        /// Data folder (overrides the config)
        #[arg(short, long)]
        data_folder: Option<PathBuf>,
    },

    /// Print the offset table, or write it to a file
    Offsets {
        /// Write the table as JSON instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Client version to select (defaults to the loaded table's)
        #[arg(long)]
        version: Option<String>,
    },

    /// Download per-unit data files from CommunityDragon
    FetchUnits {
        /// Patch to download, e.g. "11.2" or "latest"
        version: String,

        /// Folder to write the unit files into
        #[arg(short, long, default_value = "unit_data")]
        output: PathBuf,
    },

    /// Attach to the game and run the overlay views without a window
    Watch {
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,

        /// Client version to select from the offset catalog
        #[arg(long)]
        version: Option<String>,
    },

    /// Write a config file with every setting at its current value
    InitConfig,
}
