use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::{
    apply::apply_profile,
    error::AppError,
    git::{Git, Scope},
    profile::Config,
};

/// Prints the numbered profile menu, reads one line from `input` and
/// applies the chosen profile to the local repository.
///
/// There is no retry: empty or invalid input fails immediately.
///
/// # Arguments
/// * `git` - Git runner for the target repository
/// * `config` - Loaded profiles
/// * `input` - Source of the user's answer (stdin in production)
pub fn choose(git: &Git, config: &Config, input: &mut impl BufRead) -> Result<String, AppError> {
    if config.is_empty() {
        return Err(AppError::NoProfiles);
    }

    let profiles = config.sorted();
    println!("{}", "Select profile:".blue());
    for (index, profile) in profiles.iter().enumerate() {
        println!(
            "  [{}] {}: {} <{}>",
            index + 1,
            profile.id,
            profile.git_user,
            profile.git_email
        );
    }

    print!("Enter number: ");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let selected = profiles[parse_selection(&line, profiles.len())? - 1];

    apply_profile(git, selected, Scope::Local)?;
    println!(
        "{} \"{}\" to local repo",
        "Applied profile".green(),
        selected.id
    );
    Ok(selected.id.clone())
}

/// Parses a 1-based menu choice and checks it lies in `1..=count`
pub fn parse_selection(line: &str, count: usize) -> Result<usize, AppError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(AppError::NoSelection);
    }

    match line.parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Ok(choice),
        _ => Err(AppError::InvalidSelection),
    }
}
