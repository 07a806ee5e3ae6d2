//! Logical button events.

use std::fmt;

/// A debounced press of one of the two physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    /// Cycle to the next screen.
    AdvanceScreen,
    /// Start the power-off sequence.
    RequestShutdown,
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonEvent::AdvanceScreen => write!(f, "advance"),
            ButtonEvent::RequestShutdown => write!(f, "shutdown"),
        }
    }
}
