//! Storage screen fields

use crate::error::{MetricError, MetricResult};
use crate::shared_system;
use std::path::Path;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Free and total bytes of the filesystem mounted exactly at `mount_point`
pub(crate) fn disk_space(mount_point: &str) -> MetricResult<(u64, u64)> {
    let mut disks = shared_system::disks();
    disks.refresh();
    disks
        .iter()
        .find(|d| d.mount_point() == Path::new(mount_point))
        .map(|d| (d.available_space(), d.total_space()))
        .ok_or_else(|| MetricError::MountNotFound(mount_point.to_string()))
}

/// "12.3GB"
pub(crate) fn format_free(available: u64) -> String {
    format!("{:.1}GB", available as f64 / BYTES_PER_GB)
}

/// "41%", or None for a zero-sized filesystem
pub(crate) fn format_used_percent(available: u64, total: u64) -> Option<String> {
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(available);
    Some(format!("{:.0}%", used as f64 * 100.0 / total as f64))
}
