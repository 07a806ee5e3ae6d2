//! Test doubles for the collaborator traits
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! downstream crates that exercise the controller without hardware.

use crate::input::{ButtonHandler, InputSource};
use crate::metrics_provider::MetricsProvider;
use crate::renderer::{DrawSurface, Renderer};
use anyhow::{anyhow, Result};
use oled_sens_types::{
    ButtonEvent, ClockStatus, ConnectionKind, LoadStatus, NetworkStatus, Reading, SizeTier,
    StorageStatus,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered log of side effects shared between several doubles
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Append `entry` to the journal, if there is one
pub fn record(journal: &Option<Journal>, entry: &str) {
    if let Some(journal) = journal {
        journal
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry.to_string());
    }
}

/// Snapshot of a journal's entries
pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Glyph cell size per tier, matching the fonts the OLED renderer uses
pub fn glyph_size(tier: SizeTier) -> (u32, u32) {
    match tier {
        SizeTier::Large => (9, 15),
        SizeTier::Medium => (6, 10),
        SizeTier::Small => (5, 8),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    BeginFrame,
    Text {
        x: i32,
        y: i32,
        text: String,
        tier: SizeTier,
    },
    Submit,
    Clear,
}

/// Renderer that records every call instead of drawing
///
/// Clones share the same recording, so a test can keep one clone while the
/// controller owns another.
#[derive(Clone)]
pub struct RecordingRenderer {
    width: u32,
    height: u32,
    ops: Arc<Mutex<Vec<DrawOp>>>,
    fail_submit: Arc<AtomicBool>,
    journal: Option<Journal>,
}

impl RecordingRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Arc::new(Mutex::new(Vec::new())),
            fail_submit: Arc::new(AtomicBool::new(false)),
            journal: None,
        }
    }

    /// Also log `submit` and `clear` to a shared journal
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Make every following submit and clear fail
    pub fn set_fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Every string drawn so far, in order
    pub fn texts(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Strings drawn since the most recent [`DrawOp::BeginFrame`]
    pub fn last_frame_texts(&self) -> Vec<String> {
        let ops = self.ops();
        let start = ops
            .iter()
            .rposition(|op| *op == DrawOp::BeginFrame)
            .map(|i| i + 1)
            .unwrap_or(0);
        ops[start..]
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Successful submits
    pub fn submit_count(&self) -> usize {
        self.count(&DrawOp::Submit)
    }

    /// Successful clears
    pub fn clear_count(&self) -> usize {
        self.count(&DrawOp::Clear)
    }

    fn count(&self, wanted: &DrawOp) -> usize {
        self.ops().iter().filter(|op| *op == wanted).count()
    }

    fn push(&self, op: DrawOp) {
        self.ops.lock().unwrap_or_else(|e| e.into_inner()).push(op);
    }
}

impl DrawSurface for RecordingRenderer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn measure_text(&self, text: &str, tier: SizeTier) -> (u32, u32) {
        let (w, h) = glyph_size(tier);
        (w * text.chars().count() as u32, h)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, tier: SizeTier) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            tier,
        });
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) -> &mut dyn DrawSurface {
        self.push(DrawOp::BeginFrame);
        self
    }

    fn submit(&mut self) -> Result<()> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(anyhow!("Simulated display write failure"));
        }
        self.push(DrawOp::Submit);
        record(&self.journal, "submit");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(anyhow!("Simulated display write failure"));
        }
        self.push(DrawOp::Clear);
        record(&self.journal, "clear");
        Ok(())
    }
}

/// Metrics provider returning fixed values and counting queries
pub struct StaticMetrics {
    pub network: NetworkStatus,
    pub storage: StorageStatus,
    pub load: LoadStatus,
    pub temperature: Reading,
    pub clock: ClockStatus,
    /// Number of provider calls made so far
    pub queries: AtomicUsize,
}

impl Default for StaticMetrics {
    fn default() -> Self {
        Self {
            network: NetworkStatus {
                kind: ConnectionKind::Ethernet,
                ssid: Reading::Unavailable,
                ip: Reading::value("192.168.1.50"),
            },
            storage: StorageStatus {
                free: Reading::value("12.3GB"),
                used_percent: Reading::value("41.0%"),
            },
            load: LoadStatus {
                cpu: Reading::value("7.5%"),
                ram: Reading::value("412MB (22%)"),
            },
            temperature: Reading::value("48.3°C"),
            clock: ClockStatus {
                date: Reading::value("17/10/2026"),
                time: Reading::value("12:34:56"),
            },
            queries: AtomicUsize::new(0),
        }
    }
}

impl StaticMetrics {
    fn hit(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

impl MetricsProvider for StaticMetrics {
    fn network_status(&self) -> NetworkStatus {
        self.hit();
        self.network.clone()
    }

    fn storage_status(&self) -> StorageStatus {
        self.hit();
        self.storage.clone()
    }

    fn load_status(&self) -> LoadStatus {
        self.hit();
        self.load.clone()
    }

    fn temperature(&self) -> Reading {
        self.hit();
        self.temperature.clone()
    }

    fn clock(&self) -> ClockStatus {
        self.hit();
        self.clock.clone()
    }
}

/// Input source driven by the test instead of hardware
///
/// Clones share the registered handler, so `press` can be called on a clone
/// after the original was handed to an [`crate::InputGuard`].
#[derive(Clone, Default)]
pub struct ManualInput {
    handler: Arc<Mutex<Option<Arc<dyn ButtonHandler>>>>,
    releases: Arc<AtomicUsize>,
    journal: Option<Journal>,
}

impl ManualInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Deliver `event` as if its button was pressed. Ignored once released.
    pub fn press(&self, event: ButtonEvent) {
        let handler = self
            .handler
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(handler) = handler {
            handler.handle(event);
        }
    }

    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl InputSource for ManualInput {
    fn name(&self) -> &str {
        "manual"
    }

    fn start(&mut self, handler: Arc<dyn ButtonHandler>) -> Result<()> {
        *self.handler.lock().unwrap_or_else(|e| e.into_inner()) = Some(handler);
        Ok(())
    }

    fn release(&mut self) {
        self.handler.lock().unwrap_or_else(|e| e.into_inner()).take();
        self.releases.fetch_add(1, Ordering::SeqCst);
        record(&self.journal, "release");
    }
}
