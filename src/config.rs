/// Configuration loading
///
/// Settings come from `<config_dir>/commit-scopes/config.toml` when present,
/// with the database path overridable through `COMMIT_SCOPES_DB`.

use crate::error::{Result, ScopeError};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the per-user config dir
pub const APP_DIR: &str = "commit-scopes";

/// Environment variable overriding the database location
pub const DB_PATH_ENV: &str = "COMMIT_SCOPES_DB";

const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "scopes.db";

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    /// tracing filter directive used when no env filter is set
    pub log_filter: Option<String>,
}

/// On-disk shape of config.toml. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<PathBuf>,
    log_filter: Option<String>,
}

impl Config {
    /// Load configuration from the default location and the environment
    pub fn load() -> Result<Self> {
        let base = app_config_dir()?;
        let mut config = Self::load_from(&base.join(CONFIG_FILE), &base)?;

        if let Some(path) = env::var_os(DB_PATH_ENV).filter(|p| !p.is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Load from an explicit file, resolving defaults relative to `base_dir`
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load_from(file: &Path, base_dir: &Path) -> Result<Self> {
        let parsed = if file.exists() {
            let contents = std::fs::read_to_string(file)?;
            toml::from_str::<ConfigFile>(&contents)
                .map_err(|e| ScopeError::Config(format!("{}: {}", file.display(), e)))?
        } else {
            ConfigFile::default()
        };

        let database_path = match parsed.database_path {
            Some(path) if path.is_relative() => base_dir.join(path),
            Some(path) => path,
            None => base_dir.join(DB_FILE),
        };

        Ok(Self {
            database_path,
            log_filter: parsed.log_filter,
        })
    }

    /// Path of the config file this process would read
    pub fn default_file() -> Result<PathBuf> {
        Ok(app_config_dir()?.join(CONFIG_FILE))
    }
}

fn app_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| ScopeError::Config("Could not determine config directory".to_string()))
}
