//! Physical buttons and press routing

mod debounce;
mod dispatcher;
mod gpio;

pub use debounce::{Debouncer, PressFilter};
pub use dispatcher::InputDispatcher;
pub use gpio::GpioButtons;
