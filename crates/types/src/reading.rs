//! Point-in-time metric readings.
//!
//! Every field a screen shows is a [`Reading`]: either a formatted value or
//! the unavailable sentinel. Providers fill each field independently, so a
//! failure on one field never blanks its neighbours.

use std::fmt;

/// Label rendered in place of a value that could not be read.
pub const UNAVAILABLE_LABEL: &str = "N/A";

/// A single formatted metric value, or the sentinel when it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reading {
    Value(String),
    #[default]
    Unavailable,
}

impl Reading {
    pub fn value(text: impl Into<String>) -> Self {
        Reading::Value(text.into())
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Value(_))
    }

    /// The label to draw, with [`UNAVAILABLE_LABEL`] standing in for missing data.
    pub fn as_str(&self) -> &str {
        self.or_label(UNAVAILABLE_LABEL)
    }

    /// The label to draw, with a caller-chosen fallback for missing data.
    pub fn or_label<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Reading::Value(text) => text,
            Reading::Unavailable => fallback,
        }
    }
}

impl From<Option<String>> for Reading {
    fn from(value: Option<String>) -> Self {
        value.map(Reading::Value).unwrap_or(Reading::Unavailable)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the device is attached to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionKind {
    Ethernet,
    Wifi,
    /// Has an address on an interface we could not classify
    Connected,
    #[default]
    Disconnected,
    /// The probe itself failed
    Unavailable,
}

impl ConnectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionKind::Ethernet => "Ethernet",
            ConnectionKind::Wifi => "WiFi",
            ConnectionKind::Connected => "Connected",
            ConnectionKind::Disconnected => "Disconnected",
            ConnectionKind::Unavailable => UNAVAILABLE_LABEL,
        }
    }
}

/// Network screen data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkStatus {
    pub kind: ConnectionKind,
    /// Only meaningful when `kind` is [`ConnectionKind::Wifi`]
    pub ssid: Reading,
    pub ip: Reading,
}

impl NetworkStatus {
    pub fn unavailable() -> Self {
        Self {
            kind: ConnectionKind::Unavailable,
            ssid: Reading::Unavailable,
            ip: Reading::Unavailable,
        }
    }
}

/// Storage screen data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageStatus {
    pub free: Reading,
    pub used_percent: Reading,
}

impl StorageStatus {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// System load screen data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadStatus {
    pub cpu: Reading,
    pub ram: Reading,
}

impl LoadStatus {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Date and time screen data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockStatus {
    pub date: Reading,
    pub time: Reading,
}

impl ClockStatus {
    pub fn unavailable() -> Self {
        Self::default()
    }
}
