//! Input source traits and scoped ownership of the button hardware

use anyhow::Result;
use log::info;
use oled_sens_types::ButtonEvent;
use std::sync::Arc;

/// Receiver of debounced button presses
///
/// Called from whatever context the input source delivers on, possibly a
/// dedicated thread. Implementations must return quickly.
pub trait ButtonHandler: Send + Sync {
    fn on_advance_pressed(&self);

    fn on_shutdown_pressed(&self);

    /// Route a press to the matching handler
    fn handle(&self, event: ButtonEvent) {
        match event {
            ButtonEvent::AdvanceScreen => self.on_advance_pressed(),
            ButtonEvent::RequestShutdown => self.on_shutdown_pressed(),
        }
    }
}

/// Trait for the button hardware
pub trait InputSource: Send {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Start delivering presses to `handler`
    fn start(&mut self, handler: Arc<dyn ButtonHandler>) -> Result<()>;

    /// Stop delivery and hand the underlying lines back to the system.
    /// Calling it more than once is harmless.
    fn release(&mut self);
}

/// Owns an [`InputSource`] and releases it when dropped
///
/// Release happens exactly once, whether it is triggered explicitly by the
/// shutdown sequence, by the main loop's cleanup, or by unwinding.
pub struct InputGuard {
    source: Box<dyn InputSource>,
    released: bool,
}

impl InputGuard {
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self {
            source,
            released: false,
        }
    }

    pub fn start(&mut self, handler: Arc<dyn ButtonHandler>) -> Result<()> {
        self.source.start(handler)
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.source.release();
        info!("Input source '{}' released", self.source.name());
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        self.release();
    }
}
