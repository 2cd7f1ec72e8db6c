use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::WeatherError;

/// Default API root used when the config file does not override it.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://api.openweathermap.org/data/2.5/"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API root; defaults to the public OpenWeather endpoint when absent.
    pub base_url: Option<String>,

    /// OpenWeather API key. Required before any fetch can be issued.
    pub api_key: Option<String>,
}

impl Config {
    /// Validate into the configuration injected into the fetch client.
    pub fn client_config(&self) -> Result<ClientConfig, WeatherError> {
        let base_url = match &self.base_url {
            Some(url) if !url.is_empty() => url.clone(),
            Some(_) => return Err(WeatherError::Configuration("base URL is empty")),
            None => DEFAULT_BASE_URL.to_string(),
        };

        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(WeatherError::Configuration("API key is not set"))?
            .to_string();

        Ok(ClientConfig { base_url, api_key })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Validated configuration handed to [`crate::WeatherClient`] at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
}

impl ClientConfig {
    /// Build directly from explicit values, rejecting empty fields.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if base_url.is_empty() {
            return Err(WeatherError::Configuration("base URL is empty"));
        }
        if api_key.is_empty() {
            return Err(WeatherError::Configuration("API key is not set"));
        }

        Ok(Self { base_url, api_key })
    }
}
