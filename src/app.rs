//! Main loop: timed refresh, shutdown requests and process teardown

use crate::shutdown::{ShutdownOutcome, ShutdownSequencer};
use log::{debug, info, warn};
use oled_sens_core::{lock_controller, InputGuard, SharedController};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

/// Requests sent to the main loop from the input side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Shutdown,
}

/// Why [`MainLoop::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The stop future resolved (SIGINT, SIGTERM)
    Stopped,
    /// The shutdown button sequence ran to completion
    ShutdownSequence(ShutdownOutcome),
}

/// Blank the panel, logging a failure instead of returning it
///
/// Returns false if the panel could not be cleared.
pub fn blank_display(controller: &SharedController) -> bool {
    match lock_controller(controller).clear() {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not clear display: {:#}", e);
            false
        }
    }
}

/// Owns the process lifecycle once the display is up
///
/// Cleanup (blank the panel, release the buttons) runs exactly once, whether
/// `run` returns normally or the loop is dropped while unwinding. It never
/// powers the machine off.
pub struct MainLoop {
    controller: SharedController,
    input: InputGuard,
    sequencer: ShutdownSequencer,
    commands: UnboundedReceiver<LoopCommand>,
    tick_interval: Duration,
    cleaned_up: bool,
}

impl MainLoop {
    pub fn new(
        controller: SharedController,
        input: InputGuard,
        sequencer: ShutdownSequencer,
        commands: UnboundedReceiver<LoopCommand>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            controller,
            input,
            sequencer,
            commands,
            tick_interval,
            cleaned_up: false,
        }
    }

    pub async fn run<F>(mut self, stop: F) -> ExitReason
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(stop);

        info!("Main loop running, tick every {:?}", self.tick_interval);
        let reason = loop {
            tokio::select! {
                _ = &mut stop => {
                    info!("Stop requested");
                    break ExitReason::Stopped;
                }
                Some(command) = self.commands.recv() => match command {
                    LoopCommand::Shutdown => {
                        let outcome = self.sequencer.run(&mut self.input).await;
                        break ExitReason::ShutdownSequence(outcome);
                    }
                },
                _ = interval.tick() => {
                    let now = tokio::time::Instant::now().into_std();
                    lock_controller(&self.controller).tick(now);
                }
            }
        };

        self.cleanup();
        reason
    }

    fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        debug!("Cleaning up display and buttons");

        blank_display(&self.controller);
        self.input.release();
    }
}

impl Drop for MainLoop {
    fn drop(&mut self) {
        self.cleanup();
    }
}
