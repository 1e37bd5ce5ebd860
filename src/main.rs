//! reaction-export - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.export.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,reaction_export=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config(cmd)) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Edit => commands::config::handle_edit(),
        },
        Some(Commands::Completions { shell }) => commands::completions::handle::<Cli>(shell),
        None => commands::export::handle(cli.export),
    }
}
