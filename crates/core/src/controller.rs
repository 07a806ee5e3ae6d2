//! Display state machine
//!
//! The controller is the only owner of the current screen index and the
//! refresh timestamps. Both the timed poll loop and the button callbacks go
//! through a [`SharedController`], so a redraw is never computed against a
//! half-updated index.

use crate::metrics_provider::SharedMetrics;
use crate::registry::{Screen, ScreenRegistry};
use crate::renderer::BoxedRenderer;
use crate::screens::ScreenWriter;
use anyhow::Result;
use log::{debug, info, trace, warn};
use oled_sens_types::SizeTier;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Controller handle shared between the main loop and the input callbacks
pub type SharedController = Arc<Mutex<DisplayController>>;

/// Lock the shared controller, recovering from a poisoned mutex.
///
/// A panic while holding the lock leaves the state consistent (every mutation
/// is a single assignment), so the data is still safe to use.
pub fn lock_controller(controller: &SharedController) -> MutexGuard<'_, DisplayController> {
    controller.lock().unwrap_or_else(|poisoned| {
        warn!("Display controller mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Mutable display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    /// Always a valid registry index
    pub current_screen: usize,
    /// Never moves backwards
    pub last_refresh: Instant,
    pub last_interaction: Instant,
}

/// Decides when to redraw and owns the single redraw path
pub struct DisplayController {
    registry: ScreenRegistry,
    renderer: BoxedRenderer,
    metrics: SharedMetrics,
    border: i32,
    state: DisplayState,
    halted: bool,
}

impl DisplayController {
    /// Create a controller on screen 0. Nothing is drawn until [`Self::start`].
    pub fn new(
        registry: ScreenRegistry,
        renderer: BoxedRenderer,
        metrics: SharedMetrics,
        border: i32,
        now: Instant,
    ) -> Self {
        Self {
            registry,
            renderer,
            metrics,
            border,
            state: DisplayState {
                current_screen: 0,
                last_refresh: now,
                last_interaction: now,
            },
            halted: false,
        }
    }

    /// Blank the panel and show the current screen once, unconditionally.
    ///
    /// Unlike steady-state redraws, a renderer failure here is returned to the
    /// caller: a panel that does not work at startup is fatal.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        self.renderer.clear()?;
        self.render_current()?;
        self.mark_refreshed(now);
        info!(
            "Display started on screen 1/{} ({})",
            self.registry.count(),
            self.current_screen().id
        );
        Ok(())
    }

    /// Move to the next screen and redraw immediately
    ///
    /// Returns the new screen index.
    pub fn advance_screen(&mut self, now: Instant) -> usize {
        if self.halted {
            debug!("Ignoring screen advance, display is halted");
            return self.state.current_screen;
        }

        self.state.current_screen = self.registry.next(self.state.current_screen);
        if now > self.state.last_interaction {
            self.state.last_interaction = now;
        }
        info!(
            "Switching to screen {}/{} ({})",
            self.state.current_screen + 1,
            self.registry.count(),
            self.current_screen().id
        );
        self.redraw(now);
        self.state.current_screen
    }

    /// Redraw if the current screen's data is older than its interval
    ///
    /// Returns true when a frame was drawn.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.halted {
            return false;
        }

        let elapsed = now.saturating_duration_since(self.state.last_refresh);
        if elapsed > self.current_screen().refresh_interval {
            trace!(
                "Refreshing {} after {:?}",
                self.current_screen().id,
                elapsed
            );
            self.redraw(now);
            true
        } else {
            false
        }
    }

    /// Blank the panel
    pub fn clear(&mut self) -> Result<()> {
        self.renderer.clear()
    }

    /// Show a single line centered on an otherwise blank frame
    pub fn show_message(&mut self, text: &str) -> Result<()> {
        let frame = self.renderer.begin_frame();
        let (width, height) = frame.dimensions();
        let (text_width, text_height) = frame.measure_text(text, SizeTier::Medium);
        let x = (width as i32 - text_width as i32) / 2;
        let y = (height as i32 - text_height as i32) / 2;
        frame.draw_text(x.max(0), y.max(0), text, SizeTier::Medium);
        self.renderer.submit()
    }

    /// Stop reacting to ticks and advances for good
    ///
    /// Used by the shutdown sequence so nothing redraws over its message.
    pub fn halt(&mut self) {
        if !self.halted {
            info!("Display controller halted");
        }
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn current_screen(&self) -> &Screen {
        self.registry.get(self.state.current_screen)
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Steady-state redraw: failures are logged and the frame is skipped
    fn redraw(&mut self, now: Instant) {
        if let Err(e) = self.render_current() {
            warn!(
                "Skipping frame for screen {}: {:#}",
                self.current_screen().id,
                e
            );
        }
        self.mark_refreshed(now);
    }

    fn mark_refreshed(&mut self, now: Instant) {
        if now > self.state.last_refresh {
            self.state.last_refresh = now;
        }
    }

    /// The one place a screen frame is composed and submitted
    fn render_current(&mut self) -> Result<()> {
        let screen = *self.registry.get(self.state.current_screen);
        let page = format!("{}/{}", self.state.current_screen + 1, self.registry.count());
        let border = self.border;

        let frame = self.renderer.begin_frame();
        {
            let mut writer = ScreenWriter::new(&mut *frame, border);
            writer.title(screen.title);
            (screen.render)(&mut writer, self.metrics.as_ref());
        }

        let (width, height) = frame.dimensions();
        let (text_width, text_height) = frame.measure_text(&page, SizeTier::Small);
        let x = width as i32 - border - text_width as i32;
        let y = height as i32 - border - text_height as i32;
        frame.draw_text(x, y, &page, SizeTier::Small);

        self.renderer.submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingRenderer, StaticMetrics};
    use oled_sens_types::{RefreshConfig, ScreenId};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn controller(now: Instant) -> (DisplayController, RecordingRenderer, Arc<StaticMetrics>) {
        let renderer = RecordingRenderer::new(128, 64);
        let metrics = Arc::new(StaticMetrics::default());
        let controller = DisplayController::new(
            ScreenRegistry::standard(&RefreshConfig::default()),
            Box::new(renderer.clone()),
            metrics.clone(),
            5,
            now,
        );
        (controller, renderer, metrics)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_start_clears_then_shows_first_screen() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        controller.start(t0).unwrap();

        let ops = renderer.ops();
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(ops[1], DrawOp::BeginFrame);
        assert_eq!(renderer.submit_count(), 1);
        assert_eq!(renderer.texts()[0], "Network:");
        assert_eq!(controller.state().current_screen, 0);
    }

    #[test]
    fn test_start_propagates_renderer_failure() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        renderer.set_fail_submit(true);
        assert!(controller.start(t0).is_err());
    }

    #[test]
    fn test_advance_cycles_and_wraps() {
        let t0 = Instant::now();
        let (mut controller, _, _) = controller(t0);
        let sequence: Vec<usize> = (1..=5).map(|n| controller.advance_screen(t0 + secs(n))).collect();
        assert_eq!(sequence, vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_advance_redraws_immediately_and_resets_timer() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        controller.start(t0).unwrap();

        let t1 = t0 + Duration::from_millis(10);
        controller.advance_screen(t1);
        assert_eq!(renderer.submit_count(), 2);
        assert_eq!(renderer.last_frame_texts()[0], "Storage:");
        assert_eq!(controller.state().last_refresh, t1);
        assert_eq!(controller.state().last_interaction, t1);

        // The refresh timer restarted, so the fresh storage frame is not redrawn early
        assert!(!controller.tick(t1 + secs(29)));
    }

    #[test]
    fn test_storage_interval_scenario() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        controller.advance_screen(t0);
        assert_eq!(controller.current_screen().id, ScreenId::Storage);
        let before = renderer.submit_count();

        assert!(!controller.tick(t0 + secs(29)));
        assert_eq!(renderer.submit_count(), before);

        assert!(controller.tick(t0 + secs(31)));
        assert_eq!(renderer.submit_count(), before + 1);
        assert_eq!(controller.state().last_refresh, t0 + secs(31));
    }

    #[test]
    fn test_tick_at_exact_interval_does_not_redraw() {
        let t0 = Instant::now();
        let (mut controller, _, _) = controller(t0);
        // Network screen, 10s interval; the comparison is strict
        assert!(!controller.tick(t0 + secs(10)));
        assert!(controller.tick(t0 + secs(10) + Duration::from_millis(1)));
    }

    #[test]
    fn test_repeated_tick_with_same_time_redraws_once() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        let later = t0 + secs(11);
        let drawn: usize = (0..5).filter(|_| controller.tick(later)).count();
        assert_eq!(drawn, 1);
        assert_eq!(renderer.submit_count(), 1);
    }

    #[test]
    fn test_tick_without_redraw_does_not_query_metrics() {
        let t0 = Instant::now();
        let (mut controller, _, metrics) = controller(t0);
        controller.tick(t0 + secs(1));
        assert_eq!(metrics.queries.load(Ordering::SeqCst), 0);
        controller.tick(t0 + secs(11));
        assert_eq!(metrics.queries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_last_refresh_never_moves_backwards() {
        let t0 = Instant::now();
        let (mut controller, _, _) = controller(t0);
        controller.advance_screen(t0 + secs(5));
        // A tick that sampled its time before the advance took the lock
        assert!(!controller.tick(t0 + secs(4)));
        controller.advance_screen(t0 + secs(3));
        assert_eq!(controller.state().last_refresh, t0 + secs(5));
        assert_eq!(controller.state().last_interaction, t0 + secs(5));
    }

    #[test]
    fn test_submit_failure_skips_frame_but_keeps_running() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        renderer.set_fail_submit(true);
        assert!(controller.tick(t0 + secs(11)));
        assert_eq!(controller.state().last_refresh, t0 + secs(11));

        renderer.set_fail_submit(false);
        assert_eq!(controller.advance_screen(t0 + secs(12)), 1);
        assert_eq!(renderer.last_frame_texts()[0], "Storage:");
    }

    #[test]
    fn test_page_indicator_bottom_right() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        controller.advance_screen(t0);
        controller.advance_screen(t0);

        let indicator = renderer
            .ops()
            .into_iter()
            .rev()
            .find_map(|op| match op {
                DrawOp::Text { x, y, text, tier } if tier == SizeTier::Small => Some((x, y, text)),
                _ => None,
            })
            .unwrap();
        // "3/5" in the 5x8 small font: 15 wide, 8 tall
        assert_eq!(indicator, (128 - 5 - 15, 64 - 5 - 8, "3/5".to_string()));
    }

    #[test]
    fn test_failed_field_renders_sentinel_and_keeps_others() {
        let t0 = Instant::now();
        let renderer = RecordingRenderer::new(128, 64);
        let mut metrics = StaticMetrics::default();
        metrics.storage.used_percent = oled_sens_types::Reading::Unavailable;
        let expected_free = format!("Free: {}", metrics.storage.free);
        let mut controller = DisplayController::new(
            ScreenRegistry::standard(&RefreshConfig::default()),
            Box::new(renderer.clone()),
            Arc::new(metrics),
            5,
            t0,
        );
        controller.advance_screen(t0);

        let texts = renderer.last_frame_texts();
        assert_eq!(texts, vec!["Storage:".to_string(), expected_free, "Used: N/A".to_string(), "2/5".to_string()]);
    }

    #[test]
    fn test_show_message_is_centered() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        controller.show_message("Shutting down...").unwrap();
        // 16 chars of the 6x10 medium font
        let expected = DrawOp::Text {
            x: (128 - 96) / 2,
            y: (64 - 10) / 2,
            text: "Shutting down...".to_string(),
            tier: SizeTier::Medium,
        };
        assert!(renderer.ops().contains(&expected));
    }

    #[test]
    fn test_halt_freezes_display() {
        let t0 = Instant::now();
        let (mut controller, renderer, _) = controller(t0);
        controller.halt();
        assert_eq!(controller.advance_screen(t0 + secs(1)), 0);
        assert!(!controller.tick(t0 + secs(60)));
        assert_eq!(renderer.submit_count(), 0);
        assert!(controller.is_halted());
    }
}
