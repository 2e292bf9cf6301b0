//! Configuration file handling.
//!
//! The optional `mdlist.toml` holds a `[lists]` table. CLI flags override
//! file values, which override built-in defaults.

use std::path::{Path, PathBuf};

use mdlist_core::DEFAULT_SUPERVISOR;
use mdlist_render::DEFAULT_EXTENSION;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "mdlist.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level config file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub lists: ListsConfig,
}

/// `[lists]` section. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Supervisor id used by the people categories.
    pub supervisor: Option<String>,
    /// Recency cutoff year.
    pub since_year: Option<i64>,
    /// Directory of template overrides. Relative paths are taken from the
    /// directory holding the config file.
    pub template_dir: Option<PathBuf>,
    /// Template file extension, dot included.
    pub extension: Option<String>,
}

impl AppConfig {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(dir) = config.lists.template_dir.take() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            config.lists.template_dir = Some(if dir.is_relative() {
                base.join(dir)
            } else {
                dir
            });
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` when given, else [`CONFIG_FILE_NAME`] from `cwd` if it
    /// exists, else the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the chosen file cannot be read or parsed.
    /// An explicit path that does not exist is a read error.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub supervisor: Option<String>,
    pub since_year: Option<i64>,
    pub template_dir: Option<PathBuf>,
}

/// Effective settings after merging flags, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub supervisor: String,
    /// `None` means the current year minus the default lookback.
    pub since_year: Option<i64>,
    pub template_dir: Option<PathBuf>,
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            supervisor: DEFAULT_SUPERVISOR.to_string(),
            since_year: None,
            template_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Settings {
    pub fn resolve(config: &ListsConfig, overrides: Overrides) -> Self {
        let defaults = Self::default();
        Self {
            supervisor: overrides
                .supervisor
                .or_else(|| config.supervisor.clone())
                .unwrap_or(defaults.supervisor),
            since_year: overrides.since_year.or(config.since_year),
            template_dir: overrides
                .template_dir
                .or_else(|| config.template_dir.clone()),
            extension: config.extension.clone().unwrap_or(defaults.extension),
        }
    }
}
