//! Metrics provider backed by the live Linux system

use crate::{clock, load, network, storage, thermal};
use log::{debug, warn};
use oled_sens_core::MetricsProvider;
use oled_sens_types::{
    ClockStatus, LoadStatus, MetricsConfig, NetworkStatus, Reading, StorageStatus,
};
use std::path::PathBuf;
use std::time::Duration;

/// Reads every screen field from the running system
///
/// Each field is read on its own; a failure is logged and turns only that
/// field into [`Reading::Unavailable`].
pub struct SystemMetrics {
    storage_path: String,
    thermal_zone: PathBuf,
    command_timeout: Duration,
    date_format: String,
    time_format: String,
}

impl SystemMetrics {
    pub fn new(config: &MetricsConfig) -> Self {
        crate::initialize();
        Self {
            storage_path: config.storage_path.clone(),
            thermal_zone: PathBuf::from(&config.thermal_zone_path),
            command_timeout: config.command_timeout(),
            date_format: config.date_format.clone(),
            time_format: config.time_format.clone(),
        }
    }
}

impl MetricsProvider for SystemMetrics {
    fn network_status(&self) -> NetworkStatus {
        network::network_status(self.command_timeout).unwrap_or_else(|e| {
            warn!("Network probe failed: {}", e);
            NetworkStatus::unavailable()
        })
    }

    fn storage_status(&self) -> StorageStatus {
        match storage::disk_space(&self.storage_path) {
            Ok((available, total)) => StorageStatus {
                free: Reading::value(storage::format_free(available)),
                used_percent: Reading::from(storage::format_used_percent(available, total)),
            },
            Err(e) => {
                warn!("Storage probe failed: {}", e);
                StorageStatus::unavailable()
            }
        }
    }

    fn load_status(&self) -> LoadStatus {
        LoadStatus {
            cpu: Reading::from(load::cpu_usage()),
            ram: Reading::from(load::ram_usage()),
        }
    }

    fn temperature(&self) -> Reading {
        let degrees = thermal::read_thermal_zone(&self.thermal_zone).or_else(|e| {
            debug!("Thermal zone unreadable ({}), trying sysinfo components", e);
            thermal::component_temperature()
        });
        match degrees {
            Ok(degrees) => Reading::value(thermal::format_celsius(degrees)),
            Err(e) => {
                warn!("Temperature probe failed: {}", e);
                Reading::Unavailable
            }
        }
    }

    fn clock(&self) -> ClockStatus {
        clock::clock_status(&self.date_format, &self.time_format)
    }
}
