//! Test helpers shared by module tests
//!
//! Every `TestRepo` points git at its own global config file and disables
//! the system config, so tests never read or touch the developer's setup.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tempfile::TempDir;

use crate::git::Git;

pub struct TestRepo {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Freshly `git init`-ed repository
    pub fn new() -> Self {
        let repo = Self::outside_repo();
        let status = repo.raw(&["init", "-q"]).status().unwrap();
        assert!(status.success(), "git init failed");
        repo
    }

    /// Plain directory that is not inside any repository
    pub fn outside_repo() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("work");
        fs::create_dir_all(&path).unwrap();
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        Self { temp_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the profiles file for this test
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("gitprofile").join("config.json")
    }

    fn global_config(&self) -> PathBuf {
        self.temp_dir.path().join("home").join(".gitconfig")
    }

    fn isolation(&self) -> [(&'static str, PathBuf); 4] {
        [
            ("GIT_CONFIG_GLOBAL", self.global_config()),
            ("GIT_CONFIG_NOSYSTEM", PathBuf::from("1")),
            ("HOME", self.temp_dir.path().join("home")),
            ("GIT_CEILING_DIRECTORIES", self.temp_dir.path().to_path_buf()),
        ]
    }

    pub fn git(&self) -> Git {
        self.isolation()
            .into_iter()
            .fold(Git::in_dir(&self.path), |git, (key, value)| git.env(key, value))
    }

    fn raw(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.path).envs(self.isolation());
        cmd
    }

    fn read(&self, args: &[&str]) -> Option<String> {
        let output = self.raw(args).output().unwrap();
        output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Value stored in the repository's own .git/config
    pub fn local(&self, key: &str) -> Option<String> {
        self.read(&["config", "--local", "--get", key])
    }

    /// Value stored in the isolated global config
    pub fn global(&self, key: &str) -> Option<String> {
        self.read(&["config", "--global", "--get", key])
    }

    pub fn set_local(&self, key: &str, value: &str) {
        assert!(self.raw(&["config", key, value]).status().unwrap().success());
    }

    pub fn set_global(&self, key: &str, value: &str) {
        assert!(
            self.raw(&["config", "--global", key, value])
                .status()
                .unwrap()
                .success()
        );
    }
}
