//! `config-sync` binary entry point.
use anyhow::Result;
use clap::FromArgMatches as _;
use clap::error::ErrorKind;

use config_sync::cli::{self, Cli, Command};
use config_sync::commands;
use config_sync::config::Roots;
use config_sync::config::entities::{catalog, usage_summary};
use config_sync::logging::{self, Logger};
use config_sync::prompt::TerminalConfirm;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = parse_args();
    let name = args.command.name();

    logging::init_subscriber(name);
    let log = Logger::new(name);
    let roots = Roots::detect()?;

    match args.command {
        Command::Backup => commands::backup::run(&roots, &log),
        Command::Restore => commands::restore::run(&roots, &TerminalConfirm, &log),
    }
}

/// Parse the command line, exiting on any usage error.
fn parse_args() -> Cli {
    let matches = cli::command()
        .try_get_matches()
        .unwrap_or_else(|e| usage_error(&e));
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Help and version requests exit through clap; anything else prints the
/// error and the tracked-path summary and exits with status 2.
#[allow(clippy::print_stderr)]
fn usage_error(e: &clap::Error) -> ! {
    if matches!(
        e.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        e.exit();
    }
    e.print().ok();
    eprintln!("\n{}", usage_summary(catalog()));
    std::process::exit(2);
}
