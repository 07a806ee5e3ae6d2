//! Button wiring configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_advance_pin() -> u64 {
    27
}

fn default_shutdown_pin() -> u64 {
    17
}

fn default_active_low() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    200
}

/// GPIO button configuration
///
/// Pin numbers are BCM numbers. On kernels where the SoC GPIO chip does not
/// start at 0 in sysfs, set `gpio_base` to the chip base (see
/// `/sys/class/gpio/gpiochip*/base`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonsConfig {
    #[serde(default = "default_advance_pin")]
    pub advance_pin: u64,
    #[serde(default = "default_shutdown_pin")]
    pub shutdown_pin: u64,
    #[serde(default)]
    pub gpio_base: u64,
    /// Buttons pull the line to ground when pressed (external or firmware pull-up)
    #[serde(default = "default_active_low")]
    pub active_low: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl ButtonsConfig {
    /// Sysfs line number of the advance button.
    pub fn advance_line(&self) -> u64 {
        self.gpio_base + self.advance_pin
    }

    /// Sysfs line number of the shutdown button.
    pub fn shutdown_line(&self) -> u64 {
        self.gpio_base + self.shutdown_pin
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            advance_pin: default_advance_pin(),
            shutdown_pin: default_shutdown_pin(),
            gpio_base: 0,
            active_low: default_active_low(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
