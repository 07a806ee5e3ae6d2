//! oled-sens-core: Core traits and the display state machine.
//!
//! This crate contains the collaborator traits (MetricsProvider, Renderer,
//! InputSource), the ScreenRegistry with the five standard screens, and the
//! DisplayController that decides when a frame is redrawn.

pub mod constants;
mod controller;
mod input;
mod metrics_provider;
mod registry;
mod renderer;
mod screens;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use controller::{lock_controller, DisplayController, DisplayState, SharedController};
pub use input::{ButtonHandler, InputGuard, InputSource};
pub use metrics_provider::{MetricsProvider, SharedMetrics};
pub use registry::{Screen, ScreenRegistry};
pub use renderer::{BoxedRenderer, DrawSurface, Renderer};
pub use screens::{RenderFn, ScreenWriter};

// Re-export types used in trait signatures for convenience
pub use oled_sens_types::{
    ButtonEvent, ClockStatus, ConnectionKind, LoadStatus, NetworkStatus, Reading, ScreenId,
    SizeTier, StorageStatus,
};
