//! Test infrastructure for git-profile CLI tests.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command as StdCommand,
};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use tempfile::TempDir;

/// A scratch git repository plus isolated profiles file and global config.
/// Automatically cleaned up when dropped.
pub struct Sandbox {
    temp_dir: TempDir,
    repo: PathBuf,
}

impl Sandbox {
    /// Creates a sandbox whose working directory is a fresh `git init` repo.
    pub fn new() -> Self {
        let sandbox = Self::without_repo();
        let status = sandbox.git(&["init", "-q"]).status().unwrap();
        assert!(status.success(), "git init failed");
        sandbox
    }

    /// Creates a sandbox whose working directory is not a repository.
    pub fn without_repo() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(&repo).unwrap();
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        Self { temp_dir, repo }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config").join("gitprofile").join("config.json")
    }

    fn isolation(&self) -> Vec<(&'static str, PathBuf)> {
        let home = self.temp_dir.path().join("home");
        vec![
            ("GIT_CONFIG_GLOBAL", home.join(".gitconfig")),
            ("GIT_CONFIG_NOSYSTEM", PathBuf::from("1")),
            ("HOME", home),
            ("GIT_CEILING_DIRECTORIES", self.temp_dir.path().to_path_buf()),
            ("GITPROFILE_CONFIG", self.config_path()),
            ("NO_COLOR", PathBuf::from("1")),
        ]
    }

    /// `git-profile` running inside the sandbox repository.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("git-profile");
        cmd.current_dir(&self.repo).envs(self.isolation()).env_remove("RUST_LOG");
        cmd
    }

    fn git(&self, args: &[&str]) -> StdCommand {
        let mut cmd = StdCommand::new("git");
        cmd.args(args).current_dir(&self.repo).envs(self.isolation());
        cmd
    }

    fn read(&self, args: &[&str]) -> Option<String> {
        let output = self.git(args).output().unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub fn local(&self, key: &str) -> Option<String> {
        self.read(&["config", "--local", "--get", key])
    }

    pub fn global(&self, key: &str) -> Option<String> {
        self.read(&["config", "--global", "--get", key])
    }

    pub fn set_local(&self, key: &str, value: &str) {
        assert!(self.git(&["config", "--local", key, value]).status().unwrap().success());
    }

    pub fn set_global(&self, key: &str, value: &str) {
        assert!(self.git(&["config", "--global", key, value]).status().unwrap().success());
    }

    /// Adds a profile through the CLI.
    pub fn add(&self, id: &str, name: &str, email: &str, ssh_key: Option<&str>) {
        let mut cmd = self.cmd();
        cmd.args(["add", "--id", id, "--name", name, "--email", email]);
        if let Some(key) = ssh_key {
            cmd.args(["--ssh-key", key]);
        }
        cmd.assert().success();
    }

    /// The `alice` / `bob` pair used throughout the tests.
    pub fn with_alice_and_bob(self) -> Self {
        self.add("alice", "Alice A", "a@x.com", None);
        self.add("bob", "Bob B", "b@x.com", Some("/home/bob/.ssh/id_bob"));
        self
    }
}
