//! Configuration loading.
//!
//! A TOML file at `<config dir>/scicalc/config.toml` (or `--config`).
//! Every field has a default, and a missing file is not an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::calculator::AngleUnit;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub advanced: AdvancedConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct CalculatorConfig {
    pub angle_unit: AngleUnit,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Degrees,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AdvancedConfig {
    /// Model identifier for the completion service.
    pub model: String,
    /// Environment variable consulted for the API key.
    pub api_key_env: String,
    /// Inline key; the environment variable wins when both are set.
    pub api_key: Option<String>,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the default location. A missing
    /// file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Resolve the API key: environment variable first, then the inline
    /// config value. Empty strings count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.advanced.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.advanced.api_key.clone())
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scicalc").join("config.toml"))
}
