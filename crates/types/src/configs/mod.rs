//! Configuration section types.
//!
//! Each section deserializes with per-field defaults so a partial config file
//! only needs to mention what it overrides.

pub mod buttons;
pub mod display;
pub mod metrics;
pub mod refresh;
pub mod shutdown;

// Re-export all section types for convenience
pub use buttons::ButtonsConfig;
pub use display::DisplayConfig;
pub use metrics::MetricsConfig;
pub use refresh::RefreshConfig;
pub use shutdown::ShutdownConfig;
