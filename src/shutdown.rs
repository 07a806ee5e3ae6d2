//! Power-off sequence

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use oled_sens_core::{lock_controller, InputGuard, SharedController};
use oled_sens_types::ShutdownConfig;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Whatever actually turns the machine off
pub trait PowerControl: Send {
    fn power_off(&mut self) -> Result<()>;
}

/// Runs an external command such as `sudo /sbin/shutdown -h now`
pub struct CommandPowerOff {
    argv: Vec<String>,
}

impl CommandPowerOff {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl PowerControl for CommandPowerOff {
    fn power_off(&mut self) -> Result<()> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| anyhow!("No power-off command configured"))?;
        let command_line = self.argv.join(" ");
        info!("Running `{}`", command_line);

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("Failed to run `{}`", command_line))?;
        if !status.success() {
            return Err(anyhow!("`{}` exited with {}", command_line, status));
        }
        Ok(())
    }
}

/// Leaves the machine running, for bench testing
pub struct LoggedPowerOff;

impl PowerControl for LoggedPowerOff {
    fn power_off(&mut self) -> Result<()> {
        warn!("Power-off disabled, not shutting the system down");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    PowerOffRequested,
    PowerOffFailed,
}

/// Message, pause, blank, release buttons, power off
///
/// The power-off request is fire-and-forget: a failure is logged and
/// reported, never retried.
pub struct ShutdownSequencer {
    controller: SharedController,
    message: String,
    delay: Duration,
    power: Box<dyn PowerControl>,
}

impl ShutdownSequencer {
    pub fn new(
        controller: SharedController,
        message: String,
        delay: Duration,
        power: Box<dyn PowerControl>,
    ) -> Self {
        Self {
            controller,
            message,
            delay,
            power,
        }
    }

    pub fn from_config(
        controller: SharedController,
        config: &ShutdownConfig,
        power: Box<dyn PowerControl>,
    ) -> Self {
        Self::new(controller, config.message.clone(), config.delay(), power)
    }

    pub async fn run(&mut self, input: &mut InputGuard) -> ShutdownOutcome {
        info!("Starting shutdown sequence");
        {
            let mut controller = lock_controller(&self.controller);
            controller.halt();
            if let Err(e) = controller.show_message(&self.message) {
                warn!("Could not show shutdown message: {:#}", e);
            }
        }

        tokio::time::sleep(self.delay).await;

        if let Err(e) = lock_controller(&self.controller).clear() {
            warn!("Could not clear display: {:#}", e);
        }
        input.release();

        match self.power.power_off() {
            Ok(()) => {
                info!("Power-off requested");
                ShutdownOutcome::PowerOffRequested
            }
            Err(e) => {
                error!("Power-off failed: {:#}", e);
                ShutdownOutcome::PowerOffFailed
            }
        }
    }
}
