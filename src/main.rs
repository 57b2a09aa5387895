use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use clap::{CommandFactory, Parser, error::ErrorKind};
use colored::Colorize;

mod apply;
mod cli;
mod commands;
mod error;
mod git;
mod hooks;
mod logging;
mod menu;
mod profile;
mod storage;

#[cfg(test)]
mod test_utils;

use crate::{
    cli::{Cli, Commands},
    error::AppError,
    git::{Git, Scope},
    storage::get_config_path,
};

// Main
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };
    logging::init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        print_usage();
        return ExitCode::FAILURE;
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", error_prefix(io::stderr().is_terminal()), err);
            ExitCode::FAILURE
        }
    }
}

/// Routes a parsed command to its handler
fn run(command: Commands) -> Result<(), AppError> {
    let git = Git::new();

    match command {
        Commands::Add { id, name, email, ssh_key } => {
            commands::add(&get_config_path()?, id, name, email, ssh_key)
        }
        Commands::List => commands::list(&get_config_path()?),
        Commands::Use { global, profile_id } => commands::use_profile(
            &git,
            &get_config_path()?,
            profile_id,
            Scope::from_global_flag(global),
        ),
        Commands::Current => commands::current(&git),
        Commands::Choose => commands::choose(&git, &get_config_path()?, &mut io::stdin().lock()),
        Commands::SetDefault { global, profile_id } => commands::set_default(
            &git,
            &get_config_path()?,
            profile_id,
            Scope::from_global_flag(global),
        ),
        Commands::Ensure => commands::ensure(&git, &get_config_path()?, &mut io::stdin().lock()),
        Commands::InstallHooks => commands::install(&git),
    }
}

/// Help and version exit 0; every other parse error exits 1
fn parse_failure(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::InvalidSubcommand => {
            let _ = err.print();
            print_usage();
        }
        _ => {
            let _ = err.print();
        }
    }
    ExitCode::FAILURE
}

/// `Error:` prefix, red only when stderr is a terminal
fn error_prefix(stderr_is_terminal: bool) -> String {
    if stderr_is_terminal {
        "Error:".red().to_string()
    } else {
        "Error:".to_string()
    }
}

fn print_usage() {
    let _ = Cli::command().print_help();
    println!();
}
