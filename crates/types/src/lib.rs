//! oled-sens-types: Shared data types for the oled-sens status display.
//!
//! This crate contains pure data types (configs, readings, button events,
//! text size tiers) shared by every oled-sens crate. Nothing in here touches
//! hardware or the operating system, which keeps it usable as the foundation
//! layer and trivially testable.

pub mod configs;
pub mod input;
pub mod reading;
pub mod screen;
pub mod text;

// Re-export commonly used types at the crate root for convenience
pub use configs::{
    ButtonsConfig, DisplayConfig, MetricsConfig, RefreshConfig, ShutdownConfig,
};
pub use input::ButtonEvent;
pub use reading::{
    ClockStatus, ConnectionKind, LoadStatus, NetworkStatus, Reading, StorageStatus,
    UNAVAILABLE_LABEL,
};
pub use screen::{RefreshTier, ScreenId};
pub use text::SizeTier;
