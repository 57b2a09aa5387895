use std::process::ExitStatus;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// The `git` executable could not be spawned
    #[error("git executable not found on PATH")]
    GitNotFound,
    /// Git exited unsuccessfully
    #[error("`git {command}` failed ({status})")]
    GitCommand { command: String, status: ExitStatus },
    /// Error when current directory is not a Git repository
    #[error("not a git repository (git rev-parse --git-dir failed)")]
    NotInGitRepository,
    /// Error during input validation.
    #[error("{0}")]
    Validation(String),
    /// No profile stored under the given id
    #[error("profile \"{0}\" not found")]
    ProfileNotFound(String),
    /// A profile with the given id is already stored
    #[error("profile \"{0}\" already exists")]
    ProfileExists(String),
    /// The profiles file holds no profiles
    #[error("no profiles configured; run `git-profile add` first")]
    NoProfiles,
    /// Empty answer at the profile menu
    #[error("no selection made")]
    NoSelection,
    /// Menu answer that is not a number in range
    #[error("invalid selection")]
    InvalidSelection,
    /// The OS reported no per-user configuration directory
    #[error("could not determine the user configuration directory")]
    ConfigDir,
    /// A hook script could not be written
    #[error("writing hook {name}: {source}")]
    HookWrite {
        name: &'static str,
        source: std::io::Error,
    },
    /// A git config write failed while applying a profile
    #[error("setting {key}: {source}")]
    Apply {
        key: &'static str,
        source: Box<AppError>,
    },
}
