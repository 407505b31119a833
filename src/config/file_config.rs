//! Configuration file discovery and generation.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! path = "data/conferences.json"
//!
//! [remote_search]
//! enabled = false
//! endpoint = "https://dblp.org/search/publ/api"
//! timeout_seconds = 30
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use super::Config;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "conference-master.toml";

/// Directory name under the platform config directory
const APP_DIR: &str = "conference-master";

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file already exists: {0} (use --force to overwrite)")]
    Exists(String),
}

/// Locate a configuration file
///
/// Checks `./conference-master.toml` first, then
/// `<config_dir>/conference-master/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    user_config_path().filter(|path| path.is_file())
}

/// Platform-specific per-user config file location
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Write the default configuration as TOML
///
/// Refuses to replace an existing file unless `force` is set. Parent
/// directories are created as needed.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigFileError> {
    if path.exists() && !force {
        return Err(ConfigFileError::Exists(path.display().to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, content)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}
