use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::AppError, git::Git};

/// Hooks that run before commits and pushes
pub const HOOK_NAMES: [&str; 2] = ["prepare-commit-msg", "pre-push"];

/// Body of every installed hook; never blocks the git operation
pub const HOOK_SCRIPT: &str = "#!/bin/sh
# git-profile hook: ensure correct profile before commit/push
git-profile ensure >/dev/null 2>&1 || true
";

/// Writes the hook scripts into the repository's hooks directory,
/// overwriting existing files. Returns the hooks directory.
pub fn install_hooks(git: &Git) -> Result<PathBuf, AppError> {
    let hooks_dir = git.git_dir()?.join("hooks");
    fs::create_dir_all(&hooks_dir)?;

    for name in HOOK_NAMES {
        let path = hooks_dir.join(name);
        write_hook(&path).map_err(|source| AppError::HookWrite { name, source })?;
        debug!(path = %path.display(), "wrote hook");
    }

    Ok(hooks_dir)
}

fn write_hook(path: &Path) -> std::io::Result<()> {
    fs::write(path, HOOK_SCRIPT)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}
