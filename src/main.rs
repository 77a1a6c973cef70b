//! `registry-sync` — import the UniProt cross-reference registry and standardize
//! license strings.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install logging ([`logging`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Run the command:
//!    - `import` (the default, with a forced refresh) — fetch the registry if
//!      needed, parse it and write the JSON snapshot ([`importer`]);
//!    - `license` — standardize license strings ([`license`]);
//!    - `aliases` — list the license alias table.
//! 4. Render the result ([`report`]).

mod cli;
mod config;
mod error;
mod importer;
mod license;
mod logging;
mod models;
mod report;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command};
use config::{load_config, Config};
use importer::fetch::HttpFetcher;
use importer::Importer;
use license::standardizer::LicenseLookup;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config = load_config(Path::new("."), cli.config.as_deref())?;

    let command = cli.command.unwrap_or_default();
    match &command {
        Command::Import { .. } => run_import(&config, command.force_refresh(), cli.quiet).await?,
        Command::License { values, json } => run_license(values, *json)?,
        Command::Aliases => report::terminal::render_aliases(),
    }

    Ok(())
}

async fn run_import(config: &Config, force_refresh: bool, quiet: bool) -> Result<()> {
    let fetcher = HttpFetcher::new(config.importer.timeout())?;
    let importer = Importer::new(
        fetcher,
        config.importer.url.clone(),
        config.importer.data_dir.clone(),
    );

    let pb = if !quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Importing {}", importer.url()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = importer.fetch_and_parse(force_refresh).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let registry = result?;
    report::terminal::render_import(&registry, &importer.snapshot_path(), quiet);
    Ok(())
}

fn run_license(values: &[String], json: bool) -> Result<()> {
    let lookups: Vec<LicenseLookup> = values.iter().map(|raw| LicenseLookup::new(raw)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&lookups)?);
    } else {
        report::terminal::render_licenses(&lookups);
    }
    Ok(())
}
