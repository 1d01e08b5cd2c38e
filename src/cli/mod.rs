//! Command-line interface for pocket-player.
//!
//! With no subcommand the GUI launches. Subcommands inspect the song catalog
//! and manage the config file without opening a window.

mod commands;

pub use commands::{Cli, Commands, run_command};
