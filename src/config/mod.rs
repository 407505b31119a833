//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `CONFERENCE_MASTER_*` environment variables. Nested keys use a double
//! underscore, e.g. `CONFERENCE_MASTER_REMOTE_SEARCH__ENABLED=true`.

mod file_config;

pub use file_config::{
    find_config_file, user_config_path, write_default_config, ConfigFileError, LOCAL_CONFIG_FILE,
};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::DBLP_SEARCH_URL;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CONFERENCE_MASTER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Conference catalog location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Remote paper search settings
    #[serde(default)]
    pub remote_search: RemoteSearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the JSON catalog file
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl CatalogConfig {
    /// The catalog path to open
    ///
    /// A relative path that does not exist under the working directory is
    /// looked up next to the executable. The crate directory recorded at build
    /// time is tried last, for `cargo run` and tests in a source checkout.
    pub fn resolve_path(&self) -> PathBuf {
        if self.path.is_absolute() || self.path.exists() {
            return self.path.clone();
        }

        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        exe_dir
            .into_iter()
            .chain(std::iter::once(PathBuf::from(env!("CARGO_MANIFEST_DIR"))))
            .map(|base| base.join(&self.path))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| self.path.clone())
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/conferences.json")
}

/// Remote search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSearchConfig {
    /// Query DBLP for real papers instead of returning placeholders
    #[serde(default)]
    pub enabled: bool,

    /// Search endpoint speaking the DBLP API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RemoteSearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    DBLP_SEARCH_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` for structured output, anything else for plain text
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from an optional file plus the process environment
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    build_config(path, config::Environment::with_prefix(ENV_PREFIX))
}

fn build_config(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(
            config::File::from(path).format(config::FileFormat::Toml),
        );
    }

    let settings = builder
        .add_source(
            environment
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Environment variables understood by [`load_config`], with descriptions
pub fn env_vars() -> Vec<(String, &'static str)> {
    [
        ("CATALOG__PATH", "Path of the conference catalog JSON file"),
        ("REMOTE_SEARCH__ENABLED", "Query DBLP for real papers (true/false)"),
        ("REMOTE_SEARCH__ENDPOINT", "DBLP-compatible search endpoint"),
        ("REMOTE_SEARCH__TIMEOUT_SECONDS", "Remote request timeout in seconds"),
        ("LOGGING__LEVEL", "Log level (error, warn, info, debug, trace)"),
        ("LOGGING__FORMAT", "Log format (json or text)"),
    ]
    .into_iter()
    .map(|(key, description)| (format!("{}_{}", ENV_PREFIX, key), description))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.path, PathBuf::from("data/conferences.json"));
        assert!(!config.remote_search.enabled);
        assert_eq!(config.remote_search.endpoint, DBLP_SEARCH_URL);
        assert_eq!(config.remote_search.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_empty_sources_give_defaults() {
        let config = build_config(None, env(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conference-master.toml");
        std::fs::write(
            &path,
            r#"
[catalog]
path = "/srv/catalog.json"

[remote_search]
enabled = true
timeout_seconds = 5

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = build_config(Some(&path), env(&[])).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("/srv/catalog.json"));
        assert!(config.remote_search.enabled);
        assert_eq!(config.remote_search.endpoint, DBLP_SEARCH_URL);
        assert_eq!(config.remote_search.timeout_seconds, 5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[remote_search]\nenabled = false\n").unwrap();

        let config = build_config(
            Some(&path),
            env(&[
                ("CONFERENCE_MASTER_REMOTE_SEARCH__ENABLED", "true"),
                ("CONFERENCE_MASTER_REMOTE_SEARCH__TIMEOUT_SECONDS", "12"),
                ("CONFERENCE_MASTER_LOGGING__LEVEL", "warn"),
            ]),
        )
        .unwrap();

        assert!(config.remote_search.enabled);
        assert_eq!(config.remote_search.timeout_seconds, 12);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/conference-master.toml");
        assert!(build_config(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn test_resolve_bundled_catalog() {
        let config = CatalogConfig::default();
        assert!(config.resolve_path().exists());

        let absolute = CatalogConfig {
            path: PathBuf::from("/nonexistent/catalog.json"),
        };
        assert_eq!(absolute.resolve_path(), absolute.path);
    }

    #[test]
    fn test_resolve_missing_relative_path_unchanged() {
        let config = CatalogConfig {
            path: PathBuf::from("no/such/catalog.json"),
        };
        assert_eq!(config.resolve_path(), config.path);
    }

    #[test]
    fn test_resolve_prefers_executable_dir() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        let dir = tempfile::tempdir_in(&exe_dir).unwrap();
        let name = dir.path().file_name().unwrap();
        let relative = PathBuf::from(name).join("catalog.json");
        std::fs::write(exe_dir.join(&relative), "{}").unwrap();

        let config = CatalogConfig { path: relative.clone() };
        assert_eq!(config.resolve_path(), exe_dir.join(relative));
    }

    #[test]
    fn test_env_vars_are_prefixed() {
        let vars = env_vars();
        assert!(vars
            .iter()
            .all(|(name, _)| name.starts_with("CONFERENCE_MASTER_")));
        assert!(vars
            .iter()
            .any(|(name, _)| name == "CONFERENCE_MASTER_REMOTE_SEARCH__ENABLED"));
    }
}
