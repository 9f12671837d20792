use crate::comparison::DEFAULT_QUESTIONS;
use crate::csv_parser::ParseOptions;
use crate::enrich::EnrichOptions;
use crate::error::ConfigError;
use crate::game_state::GameRules;
use crate::search::SearchOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Every tunable in one YAML document. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rules: GameRules,
    pub search: SearchOptions,
    pub enrich: EnrichOptions,
    pub csv: ParseOptions,
    pub comparison_questions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            search: SearchOptions::default(),
            enrich: EnrichOptions::default(),
            csv: ParseOptions::default(),
            comparison_questions: DEFAULT_QUESTIONS,
        }
    }
}

#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stat-guess").join(CONFIG_FILE_NAME))
}

impl GameConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// # Errors
    /// `ConfigError::NotFound` only for an explicit path; a missing default
    /// file yields the defaults. Unreadable or invalid YAML is always an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(default) if default.exists() => Self::from_file(&default),
                _ => {
                    log::info!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// # Errors
    /// `ConfigError::Read` or `ConfigError::Parse`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// # Errors
    /// The YAML error when `yaml` does not describe a config.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml)
    }
}
