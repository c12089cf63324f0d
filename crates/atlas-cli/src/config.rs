//! Configuration management for Memory Atlas CLI
//!
//! Stores the data file location, export defaults and optional rule-table
//! overrides in ~/.config/memory-atlas/config.toml

use anyhow::{Context, Result};
use atlas::{AnalyticsConfig, ExportFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "memory-atlas";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "memories.json";
const DATA_FILE_ENV: &str = "ATLAS_DATA_FILE";

/// CLI Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Where memories are stored (defaults to the user data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub default_export_format: ExportFormat,
    /// Rule-table overrides; anything omitted keeps the built-in table
    #[serde(default, skip_serializing_if = "is_default_analytics")]
    pub analytics: AnalyticsConfig,
}

fn is_default_analytics(config: &AnalyticsConfig) -> bool {
    *config == AnalyticsConfig::default()
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        config
            .analytics
            .validate()
            .with_context(|| format!("Invalid [analytics] tables in {:?}", path))?;

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Resolve the memory data file: env var, then config, then default location
    pub fn data_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DATA_FILE_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join(CONFIG_DIR);
        Ok(data_dir.join(DATA_FILE))
    }

    pub fn set_data_file(&mut self, path: PathBuf) {
        self.data_file = Some(path);
    }
}
