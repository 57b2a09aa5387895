use tracing::{debug, info};

use crate::{
    error::AppError,
    git::{Git, Scope},
    profile::Profile,
};

/// Switches git identity to `profile` at `scope`
///
/// There is no rollback: if the email write fails, the name is already set.
pub fn apply_profile(git: &Git, profile: &Profile, scope: Scope) -> Result<(), AppError> {
    set(git, scope, "user.name", &profile.git_user)?;
    set(git, scope, "user.email", &profile.git_email)?;

    match profile.ssh_command() {
        Some(ssh_command) => set(git, scope, "core.sshCommand", &ssh_command)?,
        // A key from a previously applied profile must not leak into this one.
        None if scope == Scope::Local => {
            debug!("clearing local core.sshCommand");
            git.unset_config_quietly(scope, "core.sshCommand");
        }
        None => {}
    }

    info!(profile = %profile.id, %scope, "applied profile");
    Ok(())
}

fn set(git: &Git, scope: Scope, key: &'static str, value: &str) -> Result<(), AppError> {
    git.set_config(scope, key, value)
        .map_err(|source| AppError::Apply {
            key,
            source: Box::new(source),
        })
}
