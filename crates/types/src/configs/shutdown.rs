//! Shutdown sequence configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_message() -> String {
    "Shutting down...".to_string()
}

fn default_delay() -> u64 {
    3000
}

fn default_command() -> Vec<String> {
    ["sudo", "/sbin/shutdown", "-h", "now"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Shutdown sequence configuration
///
/// The command runs without a terminal, so when the daemon is not root the
/// sudoers entry for it must be NOPASSWD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// Text shown centered on the panel before powering off
    #[serde(default = "default_message")]
    pub message: String,
    /// How long the message stays up before the panel is cleared
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
    /// Program and arguments that power the machine off
    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

impl ShutdownConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            message: default_message(),
            delay_ms: default_delay(),
            command: default_command(),
        }
    }
}
