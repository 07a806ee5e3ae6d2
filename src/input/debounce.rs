//! Contact bounce suppression

use std::time::{Duration, Instant};

/// Accepts at most one press per window
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Returns true if a press at `now` counts
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

/// Turns raw edge interrupts into presses
///
/// An edge only counts if it is outside the debounce window and the line is
/// still at its pressed level when re-read.
#[derive(Debug, Clone)]
pub struct PressFilter {
    debouncer: Debouncer,
    pressed_level: u8,
}

impl PressFilter {
    pub fn new(window: Duration, active_low: bool) -> Self {
        Self {
            debouncer: Debouncer::new(window),
            pressed_level: if active_low { 0 } else { 1 },
        }
    }

    pub fn is_pressed_level(&self, level: u8) -> bool {
        level == self.pressed_level
    }

    pub fn on_edge(&mut self, now: Instant, level: u8) -> bool {
        self.is_pressed_level(level) && self.debouncer.accept(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_chatter_within_window_is_one_press() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(200));
        let accepted: Vec<bool> = [0, 3, 40, 199]
            .iter()
            .map(|offset| debouncer.accept(t0 + ms(*offset)))
            .collect();
        assert_eq!(accepted, vec![true, false, false, false]);
        assert!(debouncer.accept(t0 + ms(200)));
    }

    #[test]
    fn test_window_restarts_from_last_accepted_press() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(200));
        assert!(debouncer.accept(t0));
        assert!(!debouncer.accept(t0 + ms(150)));
        assert!(debouncer.accept(t0 + ms(250)));
        assert!(!debouncer.accept(t0 + ms(400)));
    }

    #[test]
    fn test_release_edge_is_ignored() {
        let t0 = Instant::now();
        let mut filter = PressFilter::new(ms(200), true);
        assert!(!filter.on_edge(t0, 1));
        assert!(filter.on_edge(t0 + ms(1), 0));
        assert!(!filter.on_edge(t0 + ms(50), 0));
    }

    #[test]
    fn test_active_high_wiring() {
        let mut filter = PressFilter::new(ms(200), false);
        assert!(filter.is_pressed_level(1));
        assert!(filter.on_edge(Instant::now(), 1));
    }
}
