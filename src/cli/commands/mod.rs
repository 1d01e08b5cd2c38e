//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `catalog`: Listing songs and categories
//! - `config`: Writing a default config file
//! - `cache`: Clearing the artwork cache

mod cache;
mod catalog;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::SongType;

pub use cache::cmd_clear_cache;
pub use catalog::{cmd_categories, cmd_list};
pub use config::cmd_init_config;

/// Pocket Player CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Song catalog JSON (overrides `library.catalog` in the config file)
    #[arg(long, global = true, env = "POCKET_PLAYER_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List songs in the catalog
    List {
        /// Only songs of this category (e.g. "jazz", "hip_hop")
        #[arg(short, long)]
        category: Option<SongType>,
    },
    /// Show categories with song counts
    Categories,
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Delete downloaded artwork
    ClearCache,
}

impl Cli {
    /// Catalog path from the command line, falling back to the config file.
    pub fn catalog_path(&self, config: &crate::config::Config) -> Option<PathBuf> {
        self.catalog.clone().or_else(|| config.library.catalog.clone())
    }
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning the GUI should launch).
pub fn run_command(cli: &Cli, config: &crate::config::Config) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::List { category }) => {
            cmd_list(cli.catalog_path(config).as_deref(), *category)?;
            Ok(true)
        }
        Some(Commands::Categories) => {
            cmd_categories(cli.catalog_path(config).as_deref())?;
            Ok(true)
        }
        Some(Commands::InitConfig { force }) => {
            cmd_init_config(*force)?;
            Ok(true)
        }
        Some(Commands::ClearCache) => {
            cmd_clear_cache(config)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_parse_list_with_category() {
        let cli = Cli::try_parse_from(["pocket-player", "list", "--category", "hip_hop"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                category: Some(SongType::HipHop)
            })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["pocket-player", "list", "-c", "polka"]).is_err());
    }

    #[test]
    fn test_parse_clear_cache() {
        let cli = Cli::try_parse_from(["pocket-player", "clear-cache"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ClearCache)));
    }

    #[test]
    fn test_no_subcommand_launches_gui() {
        let cli = Cli::try_parse_from(["pocket-player"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!run_command(&cli, &Config::default()).unwrap());
    }

    #[test]
    fn test_catalog_flag_overrides_config() {
        let mut config = Config::default();
        config.library.catalog = Some(PathBuf::from("/from/config.json"));

        let cli = Cli::try_parse_from(["pocket-player", "--catalog", "/from/cli.json"]).unwrap();
        assert_eq!(cli.catalog_path(&config), Some(PathBuf::from("/from/cli.json")));

        let cli = Cli::try_parse_from(["pocket-player"]).unwrap();
        if cli.catalog.is_none() {
            assert_eq!(
                cli.catalog_path(&config),
                Some(PathBuf::from("/from/config.json"))
            );
        }
    }
}
