use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use oled_sens::input::{GpioButtons, InputDispatcher};
use oled_sens::{
    blank_display, AppConfig, CommandPowerOff, ExitReason, LoggedPowerOff, MainLoop, PowerControl,
    ShutdownOutcome, ShutdownSequencer,
};
use oled_sens_core::{lock_controller, DisplayController, InputGuard, ScreenRegistry, SharedMetrics};
use oled_sens_render::{FrameRenderer, OledPanel};
use oled_sens_sources::{DeadlineMetrics, SystemMetrics};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::signal::unix::{signal, SignalKind};

/// oled-sens - Cycle system status screens on an SSD1306 OLED
#[derive(Parser, Debug, Clone)]
#[command(name = "oled-sens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to config.json in the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Run the shutdown sequence without powering the machine off
    #[arg(long = "no-poweroff")]
    no_poweroff: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    print_config: bool,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting oled-sens v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(ExitReason::ShutdownSequence(ShutdownOutcome::PowerOffFailed)) => {
            error!("Power-off command failed, exiting");
            std::process::exit(1);
        }
        Ok(reason) => info!("Exiting: {:?}", reason),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("oled-sens: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<ExitReason> {
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(ExitReason::Stopped);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    runtime.block_on(serve(config, cli.no_poweroff))
}

async fn serve(config: AppConfig, no_poweroff: bool) -> Result<ExitReason> {
    // Installed before any hardware is touched
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;

    let system: SharedMetrics = Arc::new(SystemMetrics::new(&config.metrics));
    let metrics: SharedMetrics = Arc::new(
        DeadlineMetrics::new(system, config.metrics.provider_timeout())
            .context("Failed to start metrics workers")?,
    );

    let panel = OledPanel::open(&config.display).context("Display initialization failed")?;
    let now = tokio::time::Instant::now().into_std();
    let controller = Arc::new(Mutex::new(DisplayController::new(
        ScreenRegistry::standard(&config.refresh),
        Box::new(FrameRenderer::new(panel)),
        metrics,
        config.display.border,
        now,
    )));

    let buttons = match GpioButtons::open(&config.buttons) {
        Ok(buttons) => buttons,
        Err(e) => {
            // Leave a blank panel behind rather than a stale frame
            blank_display(&controller);
            return Err(e.context("Button initialization failed"));
        }
    };
    let mut input = InputGuard::new(Box::new(buttons));

    if let Err(e) = lock_controller(&controller).start(now) {
        input.release();
        return Err(e.context("Failed to draw the first screen"));
    }

    let (commands_tx, commands_rx) = tokio::sync::mpsc::unbounded_channel();
    if let Err(e) = input.start(Arc::new(InputDispatcher::new(controller.clone(), commands_tx))) {
        input.release();
        blank_display(&controller);
        return Err(e.context("Failed to start button pollers"));
    }

    let power: Box<dyn PowerControl> = if no_poweroff {
        Box::new(LoggedPowerOff)
    } else {
        Box::new(CommandPowerOff::new(config.shutdown.command.clone()))
    };
    let sequencer = ShutdownSequencer::from_config(controller.clone(), &config.shutdown, power);

    let stop = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }
    };

    let main_loop = MainLoop::new(
        controller,
        input,
        sequencer,
        commands_rx,
        config.refresh.tick_interval(),
    );
    Ok(main_loop.run(stop).await)
}
