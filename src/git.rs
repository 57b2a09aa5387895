use std::{
    ffi::OsString,
    fmt,
    io::ErrorKind,
    path::PathBuf,
    process::{Command, ExitStatus, Output, Stdio},
};

use tracing::{debug, trace};

use crate::error::AppError;

/// Key under which the default profile id is stored in git config
pub const DEFAULT_PROFILE_KEY: &str = "gitprofile.default";

/// Which git configuration a read or write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The current repository
    Local,
    /// The invoking user's global config
    Global,
}

impl Scope {
    pub fn from_global_flag(global: bool) -> Self {
        if global { Scope::Global } else { Scope::Local }
    }

    fn flag(self) -> Option<&'static str> {
        match self {
            Scope::Local => None,
            Scope::Global => Some("--global"),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => f.write_str("local"),
            Scope::Global => f.write_str("global"),
        }
    }
}

/// Runs the external `git` binary
///
/// By default git runs in the process working directory with the
/// inherited environment.
#[derive(Debug, Clone, Default)]
pub struct Git {
    work_dir: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

impl Git {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs git inside `dir` instead of the working directory
    #[cfg(test)]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
            envs: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!(?args, "running git");
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));
        cmd
    }

    /// Executes `git config [--global] <key> <value>`
    ///
    /// Git's own stdout/stderr are inherited so its messages reach the user.
    pub fn set_config(&self, scope: Scope, key: &str, value: &str) -> Result<(), AppError> {
        let args = config_args(scope, &[key, value]);
        let status = self.command(&args).status().map_err(spawn_error)?;
        check(&args, status)
    }

    /// Executes `git config [--global] --get <key>`
    ///
    /// Returns the trimmed value, or `None` when the key is unset. Local
    /// reads see git's merged view from the current directory, so values
    /// set only globally are reported too.
    pub fn get_config(&self, scope: Scope, key: &str) -> Result<Option<String>, AppError> {
        let args = config_args(scope, &["--get", key]);
        let output = captured(self.command(&args))?;

        match output.status.code() {
            Some(0) => {
                let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
                trace!(key, %value, "git config value");
                Ok(Some(value))
            }
            Some(1) => Ok(None),
            _ => check(&args, output.status).map(|()| None),
        }
    }

    /// Executes `git config [--global] --unset <key>`, ignoring the outcome
    pub fn unset_config_quietly(&self, scope: Scope, key: &str) {
        let args = config_args(scope, &["--unset", key]);
        let mut cmd = self.command(&args);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        match cmd.status() {
            Ok(status) => trace!(key, %status, "git config --unset"),
            Err(err) => debug!(key, %err, "git config --unset could not run"),
        }
    }

    /// Locates the repository's git directory with `git rev-parse --git-dir`
    pub fn git_dir(&self) -> Result<PathBuf, AppError> {
        let output = captured(self.command(&["rev-parse", "--git-dir"]))?;
        if !output.status.success() {
            return Err(AppError::NotInGitRepository);
        }

        let dir = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        match &self.work_dir {
            Some(work_dir) if dir.is_relative() => Ok(work_dir.join(dir)),
            _ => Ok(dir),
        }
    }
}

fn config_args<'a>(scope: Scope, rest: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec!["config"];
    args.extend(scope.flag());
    args.extend_from_slice(rest);
    args
}

fn check(args: &[&str], status: ExitStatus) -> Result<(), AppError> {
    if status.success() {
        Ok(())
    } else {
        Err(AppError::GitCommand {
            command: args.join(" "),
            status,
        })
    }
}

/// Runs `cmd` collecting stdout; git's stderr is discarded
fn captured(mut cmd: Command) -> Result<Output, AppError> {
    cmd.stderr(Stdio::null()).output().map_err(spawn_error)
}

fn spawn_error(err: std::io::Error) -> AppError {
    if err.kind() == ErrorKind::NotFound {
        AppError::GitNotFound
    } else {
        AppError::Io(err)
    }
}
