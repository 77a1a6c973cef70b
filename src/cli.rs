use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "registry-sync",
    about = "Import the UniProt cross-reference registry and standardize license strings",
    version
)]
pub struct Cli {
    /// Config file [default: ./.registry-sync/config.toml, fallback ~/.config/registry-sync/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `import` with a forced refresh
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the registry, parse it and write the JSON snapshot
    Import {
        /// Reuse the downloaded document if one exists
        #[arg(long)]
        cached: bool,
    },

    /// Print the canonical label for each license string
    License {
        /// Raw license strings
        #[arg(required = true)]
        values: Vec<String>,

        /// Print a JSON array of lookups instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List canonical labels with their known spellings
    Aliases,
}

impl Command {
    /// Whether an import must download the registry even if a copy exists.
    pub fn force_refresh(&self) -> bool {
        matches!(self, Command::Import { cached: false })
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::Import { cached: false }
    }
}
