//! Time-bounded wrapper around a metrics provider
//!
//! Each category has one long-lived worker thread that runs its queries.
//! The caller waits at most the configured timeout for an answer; a query
//! that misses the deadline reads as unavailable and is left to finish on
//! its worker. While such a straggler is still running, further queries in
//! the same category return unavailable straight away so stuck probes
//! cannot pile up.

use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use log::{error, warn};
use oled_sens_core::{MetricsProvider, SharedMetrics};
use oled_sens_types::{ClockStatus, LoadStatus, NetworkStatus, Reading, StorageStatus};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One category's worker and its request queue
///
/// Each request carries the sender its answer goes back on. Dropping the
/// worker closes the queue and the thread exits after its current query.
struct Worker<T> {
    name: &'static str,
    requests: Sender<Sender<T>>,
    busy: Arc<AtomicBool>,
}

impl<T: Send + 'static> Worker<T> {
    fn spawn<F>(name: &'static str, inner: SharedMetrics, query: F) -> io::Result<Self>
    where
        F: Fn(&dyn MetricsProvider) -> T + Send + 'static,
    {
        let (requests, queue) = unbounded();
        let busy = Arc::new(AtomicBool::new(false));
        let flag = busy.clone();
        thread::Builder::new()
            .name(format!("metrics-{}", name))
            .spawn(move || run_worker(name, inner, query, queue, flag))?;
        Ok(Self {
            name,
            requests,
            busy,
        })
    }

    fn query(&self, timeout: Duration, fallback: T) -> T {
        if self.busy.swap(true, Ordering::AcqRel) {
            warn!("Previous {} query is still running, skipping", self.name);
            return fallback;
        }

        let (reply, answer) = bounded(1);
        if self.requests.send(reply).is_err() {
            self.busy.store(false, Ordering::Release);
            error!("The {} worker is gone", self.name);
            return fallback;
        }

        match answer.recv_timeout(timeout) {
            Ok(value) => value,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "{} query exceeded {:?}, showing it as unavailable",
                    self.name, timeout
                );
                fallback
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("{} query panicked", self.name);
                fallback
            }
        }
    }
}

fn run_worker<T, F>(
    name: &'static str,
    inner: SharedMetrics,
    query: F,
    queue: Receiver<Sender<T>>,
    busy: Arc<AtomicBool>,
) where
    F: Fn(&dyn MetricsProvider) -> T,
{
    for reply in queue.iter() {
        let value = panic::catch_unwind(AssertUnwindSafe(|| query(inner.as_ref())));
        busy.store(false, Ordering::Release);
        match value {
            // The receiver is gone if the caller already gave up
            Ok(value) => {
                let _ = reply.send(value);
            }
            Err(_) => error!("{} query panicked", name),
        }
    }
}

pub struct DeadlineMetrics {
    timeout: Duration,
    network: Worker<NetworkStatus>,
    storage: Worker<StorageStatus>,
    load: Worker<LoadStatus>,
    temperature: Worker<Reading>,
    clock: Worker<ClockStatus>,
}

impl DeadlineMetrics {
    /// Start one worker per category around `inner`
    pub fn new(inner: SharedMetrics, timeout: Duration) -> io::Result<Self> {
        Ok(Self {
            timeout,
            network: Worker::spawn("network", inner.clone(), |m| m.network_status())?,
            storage: Worker::spawn("storage", inner.clone(), |m| m.storage_status())?,
            load: Worker::spawn("load", inner.clone(), |m| m.load_status())?,
            temperature: Worker::spawn("temperature", inner.clone(), |m| m.temperature())?,
            clock: Worker::spawn("clock", inner, |m| m.clock())?,
        })
    }
}

impl MetricsProvider for DeadlineMetrics {
    fn network_status(&self) -> NetworkStatus {
        self.network.query(self.timeout, NetworkStatus::unavailable())
    }

    fn storage_status(&self) -> StorageStatus {
        self.storage.query(self.timeout, StorageStatus::unavailable())
    }

    fn load_status(&self) -> LoadStatus {
        self.load.query(self.timeout, LoadStatus::unavailable())
    }

    fn temperature(&self) -> Reading {
        self.temperature.query(self.timeout, Reading::Unavailable)
    }

    fn clock(&self) -> ClockStatus {
        self.clock.query(self.timeout, ClockStatus::unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oled_sens_core::testing::StaticMetrics;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    /// Network probe that blocks until released; everything else is instant
    struct StuckNetwork {
        inner: StaticMetrics,
        release: crossbeam::channel::Receiver<()>,
        network_calls: AtomicUsize,
    }

    impl MetricsProvider for StuckNetwork {
        fn network_status(&self) -> NetworkStatus {
            self.network_calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.release.recv();
            self.inner.network_status()
        }

        fn storage_status(&self) -> StorageStatus {
            self.inner.storage_status()
        }

        fn load_status(&self) -> LoadStatus {
            self.inner.load_status()
        }

        fn temperature(&self) -> Reading {
            self.inner.temperature()
        }

        fn clock(&self) -> ClockStatus {
            self.inner.clock()
        }
    }

    #[test]
    fn test_fast_queries_pass_through() {
        let inner = Arc::new(StaticMetrics::default());
        let expected = inner.load.clone();
        let metrics = DeadlineMetrics::new(inner, Duration::from_secs(5)).unwrap();
        assert_eq!(metrics.load_status(), expected);
        assert_eq!(metrics.load_status(), expected);
    }

    /// Remembers which thread served each load query
    #[derive(Default)]
    struct ThreadTracking {
        inner: StaticMetrics,
        load_threads: std::sync::Mutex<Vec<thread::ThreadId>>,
    }

    impl MetricsProvider for ThreadTracking {
        fn network_status(&self) -> NetworkStatus {
            self.inner.network_status()
        }

        fn storage_status(&self) -> StorageStatus {
            self.inner.storage_status()
        }

        fn load_status(&self) -> LoadStatus {
            self.load_threads.lock().unwrap().push(thread::current().id());
            self.inner.load_status()
        }

        fn temperature(&self) -> Reading {
            self.inner.temperature()
        }

        fn clock(&self) -> ClockStatus {
            self.inner.clock()
        }
    }

    #[test]
    fn test_queries_reuse_one_worker_per_category() {
        let inner = Arc::new(ThreadTracking::default());
        let metrics = DeadlineMetrics::new(inner.clone(), Duration::from_secs(5)).unwrap();
        for _ in 0..5 {
            assert!(metrics.load_status().cpu.is_available());
        }

        let threads = inner.load_threads.lock().unwrap().clone();
        assert_eq!(threads.len(), 5);
        assert!(threads.iter().all(|id| *id == threads[0]));
        assert_ne!(threads[0], thread::current().id());
    }

    /// Load query that panics the first time it runs
    #[derive(Default)]
    struct PanicsOnce {
        inner: StaticMetrics,
        panicked: AtomicBool,
    }

    impl MetricsProvider for PanicsOnce {
        fn network_status(&self) -> NetworkStatus {
            self.inner.network_status()
        }

        fn storage_status(&self) -> StorageStatus {
            self.inner.storage_status()
        }

        fn load_status(&self) -> LoadStatus {
            if !self.panicked.swap(true, Ordering::SeqCst) {
                panic!("load probe failed");
            }
            self.inner.load_status()
        }

        fn temperature(&self) -> Reading {
            self.inner.temperature()
        }

        fn clock(&self) -> ClockStatus {
            self.inner.clock()
        }
    }

    #[test]
    fn test_worker_survives_a_panicking_query() {
        let inner = Arc::new(PanicsOnce::default());
        let metrics = DeadlineMetrics::new(inner, Duration::from_secs(5)).unwrap();
        assert_eq!(metrics.load_status(), LoadStatus::unavailable());
        assert!(metrics.load_status().cpu.is_available());
    }

    #[test]
    fn test_stuck_query_times_out_without_blocking_others() {
        let (release_tx, release_rx) = bounded(0);
        let inner = Arc::new(StuckNetwork {
            inner: StaticMetrics::default(),
            release: release_rx,
            network_calls: AtomicUsize::new(0),
        });
        let metrics = DeadlineMetrics::new(inner.clone(), Duration::from_millis(50)).unwrap();

        let started = Instant::now();
        assert_eq!(metrics.network_status(), NetworkStatus::unavailable());
        assert!(started.elapsed() < Duration::from_secs(2));

        // Other categories are unaffected
        assert!(metrics.storage_status().free.is_available());

        // The straggler is still running, so no second probe is started
        assert_eq!(metrics.network_status(), NetworkStatus::unavailable());
        assert_eq!(inner.network_calls.load(Ordering::SeqCst), 1);

        // Once it finishes the category works again
        release_tx.send(()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while metrics.network.busy.load(Ordering::Acquire) {
            assert!(Instant::now() < deadline, "straggler never finished");
            thread::sleep(Duration::from_millis(5));
        }
        drop(release_tx);
        assert!(metrics.network_status().ip.is_available());
        assert_eq!(inner.network_calls.load(Ordering::SeqCst), 2);
    }
}
