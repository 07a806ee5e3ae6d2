//! Metrics provider trait

use oled_sens_types::{ClockStatus, LoadStatus, NetworkStatus, Reading, StorageStatus};
use std::sync::Arc;

/// Trait for the backend that reads system metrics
///
/// Queries are pull-based and synchronous. A provider never fails as a whole:
/// every field it could not read comes back as [`Reading::Unavailable`], and
/// each field is read independently of its siblings.
pub trait MetricsProvider: Send + Sync {
    /// Connection kind, SSID and IPv4 address
    fn network_status(&self) -> NetworkStatus;

    /// Free space and used percentage of the monitored filesystem
    fn storage_status(&self) -> StorageStatus;

    /// CPU usage and RAM usage
    fn load_status(&self) -> LoadStatus;

    /// CPU temperature
    fn temperature(&self) -> Reading;

    /// Local date and time
    fn clock(&self) -> ClockStatus;
}

/// Shared provider handle, cloned into the controller and the timeout wrapper
pub type SharedMetrics = Arc<dyn MetricsProvider>;
