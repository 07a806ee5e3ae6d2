//! Shared sysinfo instances
//!
//! CPU usage is a delta between two refreshes, so the `System` must outlive a
//! single query. Disk and component discovery is slow. All three are created
//! once and refreshed in place.

use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};
use sysinfo::{Components, CpuRefreshKind, Disks, RefreshKind, System};

static SHARED_SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| {
    log::info!("Creating shared System sysinfo instance");
    Mutex::new(System::new_with_specifics(
        RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
    ))
});

static SHARED_DISKS: Lazy<Mutex<Disks>> = Lazy::new(|| {
    let disks = Disks::new_with_refreshed_list();
    log::info!("Shared disk list initialized: {} disks", disks.len());
    Mutex::new(disks)
});

static SHARED_COMPONENTS: Lazy<Mutex<Components>> = Lazy::new(|| {
    let components = Components::new_with_refreshed_list();
    log::info!(
        "Shared temperature sensors initialized: {} components",
        components.len()
    );
    Mutex::new(components)
});

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    // Recover from a poisoned mutex, the sysinfo data is still valid
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("Shared {} mutex was poisoned, recovering", what);
        poisoned.into_inner()
    })
}

pub(crate) fn system() -> MutexGuard<'static, System> {
    lock(&SHARED_SYSTEM, "system")
}

pub(crate) fn disks() -> MutexGuard<'static, Disks> {
    lock(&SHARED_DISKS, "disks")
}

pub(crate) fn components() -> MutexGuard<'static, Components> {
    lock(&SHARED_COMPONENTS, "components")
}

/// Force initialization and take the first CPU sample
pub(crate) fn initialize() {
    system().refresh_cpu_all();
    let _ = &*SHARED_DISKS;
    let _ = &*SHARED_COMPONENTS;
}
