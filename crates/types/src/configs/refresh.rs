//! Refresh cadence configuration.

use crate::screen::RefreshTier;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_tick_interval() -> u64 {
    100
}

fn default_fast_interval() -> u64 {
    1000
}

fn default_network_interval() -> u64 {
    10_000
}

fn default_storage_interval() -> u64 {
    30_000
}

/// Poll cadence and per-tier redraw intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// How often the main loop asks the controller whether a redraw is due
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_fast_interval")]
    pub fast_interval_ms: u64,
    #[serde(default = "default_network_interval")]
    pub network_interval_ms: u64,
    #[serde(default = "default_storage_interval")]
    pub storage_interval_ms: u64,
}

impl RefreshConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn interval_for(&self, tier: RefreshTier) -> Duration {
        let ms = match tier {
            RefreshTier::Fast => self.fast_interval_ms,
            RefreshTier::Network => self.network_interval_ms,
            RefreshTier::Storage => self.storage_interval_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            fast_interval_ms: default_fast_interval(),
            network_interval_ms: default_network_interval(),
            storage_interval_ms: default_storage_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval_for(RefreshTier::Fast), Duration::from_secs(1));
        assert_eq!(config.interval_for(RefreshTier::Network), Duration::from_secs(10));
        assert_eq!(config.interval_for(RefreshTier::Storage), Duration::from_secs(30));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RefreshConfig =
            serde_json::from_str(r#"{"storage_interval_ms": 60000}"#).unwrap();
        assert_eq!(config.interval_for(RefreshTier::Storage), Duration::from_secs(60));
        assert_eq!(config.fast_interval_ms, 1000);
    }
}
