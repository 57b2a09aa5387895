use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::AppError, profile::Config};

/// Folder under the user config directory
const CONFIG_DIR_NAME: &str = "gitprofile";
/// Profiles file inside `CONFIG_DIR_NAME`
const CONFIG_FILE_NAME: &str = "config.json";
/// Overrides the profiles file location when set
pub const CONFIG_PATH_ENV: &str = "GITPROFILE_CONFIG";

/// Resolves the profiles file path, creating its directory if needed
pub fn get_config_path() -> Result<PathBuf, AppError> {
    let path = match std::env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => dirs::config_dir()
            .ok_or(AppError::ConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    debug!(path = %path.display(), "resolved config path");
    Ok(path)
}

/// Loads profiles from the JSON file
///
/// A missing file is an empty config; malformed JSON is an error.
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file missing, starting empty");
            return Ok(Config::default());
        }
        Err(err) => return Err(err.into()),
    };

    let config: Config = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "loaded config");
    Ok(config)
}

/// Saves profiles to the JSON file
///
/// Writes a sibling `.tmp` file and renames it over `path`, so a reader
/// sees either the old or the new contents, never a partial write.
///
/// # Arguments
/// * `config` - Profiles to save
/// * `path` - Destination file
pub fn save_config(config: &Config, path: &Path) -> Result<(), AppError> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "saved config");
    Ok(())
}
