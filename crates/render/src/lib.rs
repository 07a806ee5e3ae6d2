//! oled-sens-render: embedded-graphics frame rendering for oled-sens.
//!
//! [`FrameRenderer`] adapts any monochrome [`Panel`] to the core
//! `Renderer` trait; [`OledPanel`] is the SSD1306 module on a Linux I²C bus.

mod fonts;
mod frame;
mod panel;

pub use fonts::{font_for, text_size};
pub use frame::{FrameRenderer, Panel};
pub use panel::OledPanel;
