//! Application configuration

use anyhow::{anyhow, bail, Context, Result};
use oled_sens_types::{ButtonsConfig, DisplayConfig, MetricsConfig, RefreshConfig, ShutdownConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-wide configuration
///
/// Every section and field has a default, so an empty JSON object is a valid
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub buttons: ButtonsConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl AppConfig {
    /// Load configuration from `path`, or from the default location
    ///
    /// A missing file at the default location means defaults. An explicitly
    /// given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            log::info!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Malformed config file {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "oled-sens", "oled-sens")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the display loop cannot run with
    pub fn validate(&self) -> Result<()> {
        let refresh = &self.refresh;
        for (name, value) in [
            ("refresh.tick_interval_ms", refresh.tick_interval_ms),
            ("refresh.fast_interval_ms", refresh.fast_interval_ms),
            ("refresh.network_interval_ms", refresh.network_interval_ms),
            ("refresh.storage_interval_ms", refresh.storage_interval_ms),
            ("metrics.provider_timeout_ms", self.metrics.provider_timeout_ms),
            ("metrics.command_timeout_ms", self.metrics.command_timeout_ms),
        ] {
            if value == 0 {
                bail!("{} must be greater than zero", name);
            }
        }

        if self.buttons.advance_line() == self.buttons.shutdown_line() {
            bail!(
                "Advance and shutdown buttons share GPIO {}",
                self.buttons.advance_line()
            );
        }

        match self.shutdown.command.first() {
            Some(program) if !program.trim().is_empty() => {}
            _ => bail!("shutdown.command must name a program"),
        }

        Ok(())
    }
}
