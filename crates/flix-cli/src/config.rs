//! CLI configuration management.
//!
//! Handles the gateway endpoint, default network and template registry.

use flix_sdk::gateway::DEFAULT_GATEWAY_URL;
use flix_sdk::source::DEFAULT_FLIX_SERVER_URL;
use flix_types::network::EMULATOR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON-RPC gateway endpoint
    pub gateway_url: String,
    /// Network imports are resolved for
    pub network: String,
    /// Template registry
    pub flix_server_url: String,
    /// Default binding language
    pub language: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            network: EMULATOR.to_string(),
            flix_server_url: DEFAULT_FLIX_SERVER_URL.to_string(),
            language: "javascript".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration, writing defaults on first use.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".flixkit").join("config.toml"))
    }
}
