//! Buttons on sysfs GPIO lines

use super::debounce::PressFilter;
use anyhow::{anyhow, bail, Context, Result};
use linux_embedded_hal::sysfs_gpio::{Direction, Edge, Pin, PinPoller};
use log::{debug, error, info, trace, warn};
use oled_sens_core::{ButtonHandler, InputSource};
use oled_sens_types::{ButtonEvent, ButtonsConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long a poller waits for an edge before checking for release
const POLL_TIMEOUT_MS: isize = 100;

/// udev needs a moment to fix permissions on a freshly exported line
const EXPORT_SETTLE: Duration = Duration::from_millis(10);

/// Consecutive poll errors after which a line is given up
const MAX_POLL_FAILURES: u32 = 10;

/// Advance and shutdown buttons, one poller thread each
pub struct GpioButtons {
    lines: Vec<(ButtonEvent, u64)>,
    debounce: Duration,
    active_low: bool,
    stop: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    released: bool,
}

impl GpioButtons {
    /// Export and configure both lines
    ///
    /// If the second line fails, the first is unexported again before the
    /// error is returned.
    pub fn open(config: &ButtonsConfig) -> Result<Self> {
        let wanted = [
            (ButtonEvent::AdvanceScreen, config.advance_pin, config.advance_line()),
            (ButtonEvent::RequestShutdown, config.shutdown_pin, config.shutdown_line()),
        ];

        let mut lines = Vec::with_capacity(wanted.len());
        for (event, bcm, line) in wanted {
            match configure_input(bcm, line, config.active_low) {
                Ok(()) => lines.push((event, line)),
                Err(e) => {
                    for (_, exported) in &lines {
                        unexport(*exported);
                    }
                    return Err(e.context(format!("Failed to set up {} button", event)));
                }
            }
        }

        info!(
            "Buttons ready: advance on GPIO {}, shutdown on GPIO {}",
            config.advance_line(),
            config.shutdown_line()
        );

        Ok(Self::from_lines(lines, config.debounce(), config.active_low))
    }

    fn from_lines(lines: Vec<(ButtonEvent, u64)>, debounce: Duration, active_low: bool) -> Self {
        Self {
            lines,
            debounce,
            active_low,
            stop: Arc::new(AtomicBool::new(false)),
            workers: Vec::new(),
            released: false,
        }
    }

    fn stop_workers(&mut self) {
        self.stop.store(true, Ordering::Release);
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                warn!("A button poller panicked");
            }
        }
    }
}

fn configure_input(bcm: u64, line: u64, active_low: bool) -> Result<()> {
    let pin = Pin::new(line);
    pin.export()
        .with_context(|| format!("Failed to export GPIO {}", line))?;
    thread::sleep(EXPORT_SETTLE);

    let edge = if active_low {
        Edge::FallingEdge
    } else {
        Edge::RisingEdge
    };
    let configured = pin
        .set_direction(Direction::In)
        .and_then(|_| pin.set_edge(edge))
        .map_err(|e| anyhow!("Failed to configure GPIO {} as input: {}", line, e))
        .and_then(|_| {
            pin.get_value()
                .with_context(|| format!("Failed to read GPIO {}", line))
        })
        .and_then(|level| check_idle_level(bcm, line, level, active_low));
    if let Err(e) = configured {
        unexport(line);
        return Err(e);
    }
    Ok(())
}

/// A released button must not read as pressed
///
/// Sysfs cannot set bias, so the pull resistor comes from the firmware or
/// the board. Without it the line floats or sits at the SoC default pull,
/// which on BCM 17 and 27 is down.
fn check_idle_level(bcm: u64, line: u64, level: u8, active_low: bool) -> Result<()> {
    if !PressFilter::new(Duration::ZERO, active_low).is_pressed_level(level) {
        return Ok(());
    }
    let (pull, suffix) = if active_low {
        ("pull-up", "pu")
    } else {
        ("pull-down", "pd")
    };
    bail!(
        "GPIO {} reads {} with the button released, which is the pressed level. \
         The line has no {}: add `gpio={}={}` to /boot/config.txt or fit an external resistor",
        line,
        level,
        pull,
        bcm,
        suffix
    )
}

fn unexport(line: u64) {
    if let Err(e) = Pin::new(line).unexport() {
        warn!("Failed to unexport GPIO {}: {}", line, e);
    }
}

/// Counts poll errors in a row
#[derive(Debug, Default)]
struct PollFailures {
    consecutive: u32,
}

impl PollFailures {
    /// Returns true once the line should be given up
    fn record(&mut self) -> bool {
        self.consecutive += 1;
        self.consecutive >= MAX_POLL_FAILURES
    }

    fn reset(&mut self) {
        self.consecutive = 0;
    }
}

/// Wait for edges on one line until `stop` is set
fn poll_line(
    line: u64,
    event: ButtonEvent,
    mut poller: PinPoller,
    mut filter: PressFilter,
    stop: Arc<AtomicBool>,
    handler: Arc<dyn ButtonHandler>,
) {
    let pin = Pin::new(line);
    let mut failures = PollFailures::default();

    while !stop.load(Ordering::Acquire) {
        match poller.poll(POLL_TIMEOUT_MS) {
            Ok(Some(level)) => {
                failures.reset();
                trace!("GPIO {} edge, level {}", line, level);
                // Re-read so a bounce back to idle does not count as a press
                let level = pin.get_value().unwrap_or(level);
                if filter.on_edge(Instant::now(), level) {
                    debug!("{} pressed", event);
                    handler.handle(event);
                }
            }
            Ok(None) => failures.reset(),
            Err(e) => {
                if failures.record() {
                    error!(
                        "Polling GPIO {} failed {} times in a row, the {} button is now dead: {}",
                        line, MAX_POLL_FAILURES, event, e
                    );
                    return;
                }
                warn!("Polling GPIO {} failed: {}", line, e);
                thread::sleep(Duration::from_millis(POLL_TIMEOUT_MS as u64));
            }
        }
    }
}

impl InputSource for GpioButtons {
    fn name(&self) -> &str {
        "gpio"
    }

    /// Opens every poller before any thread runs, so a line that cannot be
    /// watched fails here instead of inside its worker
    fn start(&mut self, handler: Arc<dyn ButtonHandler>) -> Result<()> {
        if self.released {
            return Err(anyhow!("GPIO buttons were already released"));
        }

        let mut pollers = Vec::with_capacity(self.lines.len());
        for (event, line) in self.lines.iter().copied() {
            let poller = Pin::new(line)
                .get_poller()
                .with_context(|| format!("Failed to watch GPIO {} for {} presses", line, event))?;
            pollers.push((event, line, poller));
        }

        for (event, line, poller) in pollers {
            let filter = PressFilter::new(self.debounce, self.active_low);
            let stop = self.stop.clone();
            let handler = handler.clone();
            let spawned = thread::Builder::new()
                .name(format!("gpio-{}", line))
                .spawn(move || poll_line(line, event, poller, filter, stop, handler));
            match spawned {
                Ok(worker) => self.workers.push(worker),
                Err(e) => {
                    self.stop_workers();
                    return Err(anyhow::Error::new(e)
                        .context(format!("Failed to start poller for GPIO {}", line)));
                }
            }
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        self.stop_workers();
        for (_, line) in &self.lines {
            unexport(*line);
        }
    }
}

impl Drop for GpioButtons {
    fn drop(&mut self) {
        self.release();
    }
}
