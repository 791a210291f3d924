//! Config file load and save.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::types::AgentConfig;

/// Default config location: `config.json` next to the executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()?
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine executable directory"))?
        .to_path_buf();
    Ok(exe_dir.join("config.json"))
}

pub async fn load_config(path: Option<&Path>) -> Result<AgentConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if config_path.exists() {
        let content = tokio::fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config: {:?}", config_path))?;
        let config: AgentConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", config_path))?;

        info!("Loaded configuration from: {:?}", config_path);
        Ok(config)
    } else {
        info!("Config file {:?} not found, using built-in UPS table", config_path);
        Ok(AgentConfig::default())
    }
}

pub async fn save_config(config: &AgentConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write config: {:?}", path))?;
    info!("Configuration saved to: {:?}", path);
    Ok(())
}
