//! oled-sens: status screens on a small OLED for headless Linux boards
//!
//! This library wires the display state machine from `oled-sens-core` to
//! the hardware and the process lifecycle:
//! - Configuration loading and validation
//! - GPIO buttons, debouncing and press routing
//! - The power-off sequence
//! - The main loop and its cleanup path

pub mod app;
pub mod config;
pub mod input;
pub mod shutdown;

// Re-export commonly used types
pub use app::{blank_display, ExitReason, LoopCommand, MainLoop};
pub use config::AppConfig;
pub use shutdown::{CommandPowerOff, LoggedPowerOff, PowerControl, ShutdownOutcome, ShutdownSequencer};
