//! System load screen fields

use crate::shared_system;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Global CPU usage since the previous sample
pub(crate) fn cpu_usage() -> Option<String> {
    let mut system = shared_system::system();
    system.refresh_cpu_all();
    let usage = system.global_cpu_usage();
    if usage.is_finite() {
        Some(format!("{:.0}%", usage))
    } else {
        None
    }
}

/// "412MB (22%)"
pub(crate) fn ram_usage() -> Option<String> {
    let mut system = shared_system::system();
    system.refresh_memory();
    format_ram(system.used_memory(), system.total_memory())
}

pub(crate) fn format_ram(used: u64, total: u64) -> Option<String> {
    if total == 0 {
        return None;
    }
    let percent = used as f64 * 100.0 / total as f64;
    Some(format!("{}MB ({:.0}%)", used / BYTES_PER_MB, percent))
}
