//! depotsize CLI - Command-line interface
//!
//! Reports how much disk space a game will take, using the catalog's depot
//! manifests and the user's DLC, optional-content and region settings.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use depotsize::config::ConfigFile;
use depotsize::logging::{init_logging, LoggingConfig};

use commands::common::log_level;
use commands::config::ConfigCommands;
use commands::index::IndexAction;
use commands::size::SizeArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "depotsize")]
#[command(version, about = "Report game install sizes from catalog depot manifests", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report a game's install size
    Size {
        /// Game title as shown in the library
        name: String,

        /// Library source the game came from (e.g., Steam)
        #[arg(long)]
        source: Option<String>,

        /// Identifier the source stores for the game (the catalog app id for Steam)
        #[arg(long)]
        store_id: Option<String>,

        /// Include owned downloadable content
        #[arg(long)]
        dlc: bool,

        /// Include optional content
        #[arg(long)]
        optional: bool,

        /// Disc or ROM image for physical-media titles
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,

        /// Treat the game as not installed
        #[arg(long)]
        not_installed: bool,

        /// Platform the library records for the game
        #[arg(long, default_value = "PC")]
        platform: String,

        /// Print the per-app catalog breakdown
        #[arg(long)]
        breakdown: bool,
    },

    /// Look up a title's catalog app id
    Resolve {
        /// Game title
        name: String,
    },

    /// Manage the cached catalog app list
    Index {
        #[command(subcommand)]
        action: IndexAction,
    },

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Size {
            name,
            source,
            store_id,
            dlc,
            optional,
            image,
            not_installed,
            platform,
            breakdown,
        } => commands::size::run(SizeArgs {
            name,
            source,
            store_id,
            dlc,
            optional,
            image,
            not_installed,
            platform,
            breakdown,
        }),
        Commands::Resolve { name } => commands::resolve::run(&name),
        Commands::Index { action } => commands::index::run(action),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn main() {
    let cli = Cli::parse();

    let file = ConfigFile::load().unwrap_or_default();
    let mut logging = LoggingConfig::new(log_level(cli.verbose, &file.logging.level));
    if let Some(dir) = &file.logging.directory {
        logging = logging.with_directory(dir.clone());
    }

    let guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", CliError::from(e));
            process::exit(1);
        }
    };

    let result = run(cli.command);
    drop(guard);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_size_command() {
        let cli = Cli::try_parse_from([
            "depotsize",
            "-vv",
            "size",
            "Portal 2",
            "--source",
            "Steam",
            "--store-id",
            "620",
            "--dlc",
            "--breakdown",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Size {
                name,
                source,
                store_id,
                dlc,
                optional,
                platform,
                breakdown,
                ..
            } => {
                assert_eq!(name, "Portal 2");
                assert_eq!(source.as_deref(), Some("Steam"));
                assert_eq!(store_id.as_deref(), Some("620"));
                assert!(dlc);
                assert!(!optional);
                assert_eq!(platform, "PC");
                assert!(breakdown);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_set() {
        let cli =
            Cli::try_parse_from(["depotsize", "config", "set", "size.include_dlc", "true"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { .. }
            }
        ));
    }

    #[test]
    fn test_parse_index_status() {
        let cli = Cli::try_parse_from(["depotsize", "index", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Index {
                action: IndexAction::Status
            }
        ));
    }
}
