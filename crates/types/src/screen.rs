//! Screen identifiers and refresh tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five standard screens, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    Network,
    Storage,
    SystemLoad,
    Temperature,
    DateTime,
}

impl ScreenId {
    /// Display order used by the standard registry.
    pub const ALL: [ScreenId; 5] = [
        ScreenId::Network,
        ScreenId::Storage,
        ScreenId::SystemLoad,
        ScreenId::Temperature,
        ScreenId::DateTime,
    ];

    /// How quickly this screen's data goes stale.
    pub fn refresh_tier(&self) -> RefreshTier {
        match self {
            ScreenId::Network => RefreshTier::Network,
            ScreenId::Storage => RefreshTier::Storage,
            ScreenId::SystemLoad | ScreenId::Temperature | ScreenId::DateTime => RefreshTier::Fast,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenId::Network => "network",
            ScreenId::Storage => "storage",
            ScreenId::SystemLoad => "system-load",
            ScreenId::Temperature => "temperature",
            ScreenId::DateTime => "date-time",
        };
        f.write_str(name)
    }
}

/// Refresh cadence category. Concrete intervals come from [`crate::RefreshConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefreshTier {
    /// CPU, RAM, temperature, clock
    Fast,
    Network,
    Storage,
}
