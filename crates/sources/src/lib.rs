//! oled-sens-sources: Linux metrics provider for oled-sens.
//!
//! [`SystemMetrics`] reads every field the screens show from sysinfo, the
//! thermal zone file, `ip`/`iwgetid` and the local clock. [`DeadlineMetrics`]
//! wraps any provider so a stuck query can never stall the display loop.

mod clock;
mod command;
mod deadline;
mod error;
mod load;
mod network;
mod shared_system;
mod storage;
mod system;
mod thermal;

pub use command::run_command;
pub use deadline::DeadlineMetrics;
pub use error::{MetricError, MetricResult};
pub use network::{parse_ip_addr_output, select_address, InterfaceAddress, NO_IP_LABEL};
pub use system::SystemMetrics;

/// Initialize the shared sysinfo instances (call once at startup)
///
/// Disk and sensor discovery is slow on some boards; doing it up front keeps
/// the first frame of each screen on schedule.
pub fn initialize() {
    shared_system::initialize();
}
