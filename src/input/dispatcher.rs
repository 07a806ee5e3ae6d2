//! Routes button presses to the display controller and the main loop

use crate::app::LoopCommand;
use log::{debug, info, warn};
use oled_sens_core::{lock_controller, ButtonHandler, SharedController};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc::UnboundedSender;

/// Button handler shared with the input source's threads
///
/// Advance presses redraw straight away under the controller lock. A shutdown
/// press is forwarded to the main loop exactly once; after it, every press is
/// ignored.
pub struct InputDispatcher {
    controller: SharedController,
    commands: UnboundedSender<LoopCommand>,
    shutdown_requested: AtomicBool,
}

impl InputDispatcher {
    pub fn new(controller: SharedController, commands: UnboundedSender<LoopCommand>) -> Self {
        Self {
            controller,
            commands,
            shutdown_requested: AtomicBool::new(false),
        }
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }
}

impl ButtonHandler for InputDispatcher {
    fn on_advance_pressed(&self) {
        if self.shutdown_requested() {
            debug!("Ignoring advance press during shutdown");
            return;
        }
        let now = tokio::time::Instant::now().into_std();
        lock_controller(&self.controller).advance_screen(now);
    }

    fn on_shutdown_pressed(&self) {
        if self.shutdown_requested.swap(true, Ordering::AcqRel) {
            debug!("Shutdown already requested, ignoring press");
            return;
        }
        info!("Shutdown button pressed");
        if self.commands.send(LoopCommand::Shutdown).is_err() {
            warn!("Main loop is gone, shutdown request dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oled_sens_core::testing::{RecordingRenderer, StaticMetrics};
    use oled_sens_core::{DisplayController, ScreenRegistry};
    use oled_sens_types::{ButtonEvent, RefreshConfig};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;
    use tokio::sync::mpsc::{error::TryRecvError, unbounded_channel};

    fn controller() -> (SharedController, RecordingRenderer) {
        let renderer = RecordingRenderer::new(128, 64);
        let controller = DisplayController::new(
            ScreenRegistry::standard(&RefreshConfig::default()),
            Box::new(renderer.clone()),
            Arc::new(StaticMetrics::default()),
            5,
            Instant::now(),
        );
        (Arc::new(Mutex::new(controller)), renderer)
    }

    #[test]
    fn test_advance_redraws_next_screen() {
        let (controller, renderer) = controller();
        let (tx, _rx) = unbounded_channel();
        let dispatcher = InputDispatcher::new(controller.clone(), tx);

        dispatcher.handle(ButtonEvent::AdvanceScreen);
        dispatcher.handle(ButtonEvent::AdvanceScreen);
        assert_eq!(lock_controller(&controller).state().current_screen, 2);
        assert_eq!(renderer.submit_count(), 2);
        assert_eq!(renderer.last_frame_texts()[0], "System:");
    }

    #[test]
    fn test_shutdown_is_forwarded_once() {
        let (controller, _) = controller();
        let (tx, mut rx) = unbounded_channel();
        let dispatcher = InputDispatcher::new(controller, tx);

        dispatcher.handle(ButtonEvent::RequestShutdown);
        dispatcher.handle(ButtonEvent::RequestShutdown);
        assert_eq!(rx.try_recv(), Ok(LoopCommand::Shutdown));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(dispatcher.shutdown_requested());
    }

    #[test]
    fn test_advance_ignored_after_shutdown_request() {
        let (controller, renderer) = controller();
        let (tx, _rx) = unbounded_channel();
        let dispatcher = InputDispatcher::new(controller.clone(), tx);

        dispatcher.handle(ButtonEvent::RequestShutdown);
        dispatcher.handle(ButtonEvent::AdvanceScreen);
        assert_eq!(lock_controller(&controller).state().current_screen, 0);
        assert_eq!(renderer.submit_count(), 0);
    }

    #[test]
    fn test_closed_loop_does_not_panic() {
        let (controller, _) = controller();
        let (tx, rx) = unbounded_channel();
        drop(rx);
        let dispatcher = InputDispatcher::new(controller, tx);
        dispatcher.handle(ButtonEvent::RequestShutdown);
        assert!(dispatcher.shutdown_requested());
    }
}
