//! App-list index CLI commands.
//!
//! - `refresh`: Download the catalog's app list and rewrite the disk cache
//! - `status`: Show the cached list's location, size and age

use clap::Subcommand;

use super::common::CliRunner;
use crate::error::CliError;

/// Index subcommands.
#[derive(Debug, Subcommand)]
pub enum IndexAction {
    /// Download the app list now
    Refresh,
    /// Show app list cache status
    Status,
}

/// Run an index subcommand.
pub fn run(action: IndexAction) -> Result<(), CliError> {
    match action {
        IndexAction::Refresh => run_refresh(),
        IndexAction::Status => run_status(),
    }
}

fn run_refresh() -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let engine = runner.engine()?;

    println!("Downloading app list from {}...", engine.config().app_list_url);
    let titles = runner.runtime().block_on(engine.refresh_index())?;
    println!("Indexed {} titles.", titles);

    if let Some(path) = &engine.config().app_list_cache_path {
        println!("Cache: {}", path.display());
    }
    Ok(())
}

fn run_status() -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    let engine = runner.engine()?;
    let ttl = engine.config().app_list_ttl;

    if let Some(path) = &engine.config().app_list_cache_path {
        println!("Cache file: {}", path.display());
    }

    match runner.runtime().block_on(engine.cached_index())? {
        Some(cache) => {
            let state = if cache.is_fresh(ttl) { "fresh" } else { "stale" };
            println!("  Titles:  {}", cache.entries.len());
            println!("  Fetched: {}", cache.age_human());
            println!("  Status:  {} (refreshes after {}h)", state, ttl.as_secs() / 3600);
            println!("  Version: {}", cache.version);
        }
        None => {
            println!("  No app list cached. Run 'depotsize index refresh' to download it.");
        }
    }
    Ok(())
}
