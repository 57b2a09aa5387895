use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Represents a git identity stored in the profiles file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile id (e.g. work, personal)
    pub id: String,
    /// Git username (user.name)
    pub git_user: String,
    /// Git email address (user.email)
    pub git_email: String,
    /// Private key handed to ssh through core.sshCommand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key_path: Option<String>,
}

impl Profile {
    /// SSH key path, with an empty string treated as absent
    pub fn ssh_key(&self) -> Option<&str> {
        self.ssh_key_path.as_deref().filter(|path| !path.is_empty())
    }

    /// Value for core.sshCommand when the profile pins a key.
    ///
    /// `-F /dev/null` keeps the user's ssh config from overriding the key.
    pub fn ssh_command(&self) -> Option<String> {
        self.ssh_key().map(|path| format!("ssh -i {path} -F /dev/null"))
    }
}

/// Contents of config.json: profiles keyed by id, kept in sorted order
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in sorted id order
    pub fn sorted(&self) -> Vec<&Profile> {
        self.profiles.values().collect()
    }

    /// Inserts a new profile, refusing to replace an existing id
    pub fn insert(&mut self, profile: Profile) -> Result<(), AppError> {
        if self.profiles.contains_key(&profile.id) {
            return Err(AppError::ProfileExists(profile.id));
        }
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }
}
