//! Command-line surface: `config-sync backup` and `config-sync restore`.
use clap::{CommandFactory as _, Parser, Subcommand};

use crate::config::entities::{catalog, usage_summary};

/// Top-level CLI entry point for the configuration sync utility.
#[derive(Parser, Debug)]
#[command(
    name = "config-sync",
    about = "Back up and restore agent configuration to a version-controlled snapshot",
    version = option_env!("CONFIG_SYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Copy the live configuration into the snapshot
    Backup,
    /// Overwrite the live configuration from the snapshot (asks first)
    Restore,
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Restore => "restore",
        }
    }
}

/// Build the clap command, with the tracked paths appended to the help text.
#[must_use]
pub fn command() -> clap::Command {
    Cli::command().after_help(usage_summary(catalog()))
}
