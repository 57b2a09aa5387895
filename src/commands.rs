//! One handler per CLI command.
//!
//! Handlers load the profiles file themselves when they need it, print
//! their results to stdout and report failures as `AppError`.

use std::{io::BufRead, path::Path};

use colored::Colorize;
use tracing::debug;

use crate::{
    apply::apply_profile,
    error::AppError,
    git::{DEFAULT_PROFILE_KEY, Git, Scope},
    hooks::install_hooks,
    menu,
    profile::{Config, Profile},
    storage::{load_config, save_config},
};

/// Creates a new profile and persists it
pub fn add(
    config_path: &Path,
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    ssh_key: Option<String>,
) -> Result<(), AppError> {
    let (Some(id), Some(name), Some(email)) = (non_empty(id), non_empty(name), non_empty(email))
    else {
        return Err(AppError::Validation(
            "id, name and email are required".to_string(),
        ));
    };

    let mut config = load_config(config_path)?;
    config.insert(Profile {
        id: id.clone(),
        git_user: name,
        git_email: email,
        ssh_key_path: non_empty(ssh_key),
    })?;
    save_config(&config, config_path)?;

    println!("{} \"{}\"", "Added profile".green(), id);
    Ok(())
}

/// Prints all profiles in id order
pub fn list(config_path: &Path) -> Result<(), AppError> {
    let config = load_config(config_path)?;
    if config.is_empty() {
        println!("{}", "No profiles configured yet.".yellow());
        return Ok(());
    }

    println!("{}", "Configured profiles:".blue());
    for profile in config.sorted() {
        println!(
            "  - {}: {} <{}>, ssh={}",
            profile.id,
            profile.git_user,
            profile.git_email,
            profile.ssh_key().unwrap_or("(default SSH)")
        );
    }
    Ok(())
}

/// Applies a stored profile at the requested scope
pub fn use_profile(
    git: &Git,
    config_path: &Path,
    profile_id: Option<String>,
    scope: Scope,
) -> Result<(), AppError> {
    let id = required_id(profile_id, "use")?;
    let config = load_config(config_path)?;
    let profile = find(&config, &id)?;

    apply_profile(git, profile, scope)?;
    println!(
        "{} \"{}\" to {} git config",
        "Applied profile".green(),
        id,
        scope
    );
    Ok(())
}

/// Shows the identity git will use in this repository plus stored defaults
pub fn current(git: &Git) -> Result<(), AppError> {
    let name = git.get_config(Scope::Local, "user.name")?;
    let email = git.get_config(Scope::Local, "user.email")?;

    if name.is_none() && email.is_none() {
        return Err(AppError::Validation(
            "no user.name or user.email set in this repo".to_string(),
        ));
    }

    println!("{}", "Current git identity (this repo):".blue());
    if let Some(name) = name {
        println!("  user.name  = {name}");
    }
    if let Some(email) = email {
        println!("  user.email = {email}");
    }

    match git
        .get_config(Scope::Local, "core.sshCommand")?
        .filter(|ssh| !ssh.is_empty())
    {
        Some(ssh) => println!("  core.sshCommand = {ssh}"),
        None => println!("  core.sshCommand = (default)"),
    }

    for scope in [Scope::Local, Scope::Global] {
        if let Some(default) = stored_default(git, scope) {
            println!("  {DEFAULT_PROFILE_KEY} ({scope}) = {default}");
        }
    }
    Ok(())
}

/// Interactive numbered menu; applies the choice locally
pub fn choose(git: &Git, config_path: &Path, input: &mut impl BufRead) -> Result<(), AppError> {
    let config = load_config(config_path)?;
    menu::choose(git, &config, input)?;
    Ok(())
}

/// Records a known profile id under `gitprofile.default`
pub fn set_default(
    git: &Git,
    config_path: &Path,
    profile_id: Option<String>,
    scope: Scope,
) -> Result<(), AppError> {
    let id = required_id(profile_id, "set-default")?;
    let config = load_config(config_path)?;
    find(&config, &id)?;

    git.set_config(scope, DEFAULT_PROFILE_KEY, &id)?;
    println!("{} \"{}\" as {} default profile", "Set".green(), id, scope);
    Ok(())
}

/// Applies the local default, else the global default, else prompts.
///
/// Whatever tier resolves, the profile is applied to the local repository.
pub fn ensure(git: &Git, config_path: &Path, input: &mut impl BufRead) -> Result<(), AppError> {
    let config = load_config(config_path)?;
    if config.is_empty() {
        return Err(AppError::NoProfiles);
    }

    let local = stored_default(git, Scope::Local);
    let global = stored_default(git, Scope::Global);

    match resolve_default(&config, local.as_deref(), global.as_deref()) {
        Some((profile, tier)) => {
            debug!(profile = %profile.id, %tier, "default resolved");
            apply_profile(git, profile, Scope::Local)?;
            println!("{} \"{}\" as default", "Applied profile".green(), profile.id);
            Ok(())
        }
        None => {
            menu::choose(git, &config, input)?;
            Ok(())
        }
    }
}

/// First default naming a known profile, local before global.
///
/// The local value is git's merged view, so it already reflects a global
/// default when the repository sets none. Defaults pointing at unknown
/// ids are skipped, not reported.
pub fn resolve_default<'a>(
    config: &'a Config,
    local: Option<&str>,
    global: Option<&str>,
) -> Option<(&'a Profile, Scope)> {
    [(local, Scope::Local), (global, Scope::Global)]
        .into_iter()
        .find_map(|(id, scope)| {
            let id = id?;
            match config.get(id) {
                Some(profile) => Some((profile, scope)),
                None => {
                    debug!(id, %scope, "default names unknown profile, skipping");
                    None
                }
            }
        })
}

/// Writes the commit/push hooks for the current repository
pub fn install(git: &Git) -> Result<(), AppError> {
    let hooks_dir = install_hooks(git)?;
    println!(
        "{} {}",
        "Installed git-profile hooks in".green(),
        hooks_dir.display()
    );
    println!("From now on, normal `git commit` and `git push` will apply/ask for a profile.");
    Ok(())
}

fn stored_default(git: &Git, scope: Scope) -> Option<String> {
    match git.get_config(scope, DEFAULT_PROFILE_KEY) {
        Ok(value) => value.filter(|id| !id.is_empty()),
        Err(err) => {
            debug!(%scope, %err, "could not read default profile");
            None
        }
    }
}

fn find<'a>(config: &'a Config, id: &str) -> Result<&'a Profile, AppError> {
    config
        .get(id)
        .ok_or_else(|| AppError::ProfileNotFound(id.to_string()))
}

fn required_id(profile_id: Option<String>, command: &str) -> Result<String, AppError> {
    non_empty(profile_id).ok_or_else(|| {
        AppError::Validation(format!(
            "usage: git-profile {command} [--global] <profile-id>"
        ))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
