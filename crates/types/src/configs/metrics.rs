//! Metrics collection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_storage_path() -> String {
    "/".to_string()
}

fn default_thermal_zone_path() -> String {
    "/sys/class/thermal/thermal_zone0/temp".to_string()
}

fn default_provider_timeout() -> u64 {
    1000
}

fn default_command_timeout() -> u64 {
    2000
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_time_format() -> String {
    "%H:%M:%S".to_string()
}

/// Metrics provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Mount point reported on the storage screen
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// File holding the CPU temperature in millidegrees Celsius
    #[serde(default = "default_thermal_zone_path")]
    pub thermal_zone_path: String,
    /// Upper bound for a single provider query before it reads as unavailable
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_ms: u64,
    /// Upper bound for external helper commands (`ip`, `iwgetid`)
    #[serde(default = "default_command_timeout")]
    pub command_timeout_ms: u64,
    /// chrono format string for the date line
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// chrono format string for the time line
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

impl MetricsConfig {
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            thermal_zone_path: default_thermal_zone_path(),
            provider_timeout_ms: default_provider_timeout(),
            command_timeout_ms: default_command_timeout(),
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}
