//! OLED panel configuration.

use serde::{Deserialize, Serialize};

fn default_i2c_bus() -> String {
    "/dev/i2c-1".to_string()
}

fn default_address() -> u8 {
    0x3C
}

fn default_border() -> i32 {
    5
}

/// SSD1306 panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// I²C character device the panel hangs off
    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: String,
    /// 7-bit I²C address, usually 0x3C or 0x3D
    #[serde(default = "default_address")]
    pub address: u8,
    /// Mount the panel upside down
    #[serde(default)]
    pub rotate_180: bool,
    /// Margin in pixels kept clear around the content
    #[serde(default = "default_border")]
    pub border: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_bus: default_i2c_bus(),
            address: default_address(),
            rotate_180: false,
            border: default_border(),
        }
    }
}
