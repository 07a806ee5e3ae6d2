//! The five standard screens and the line writer they draw through

use crate::constants::{LINE_GAP, LINE_HEIGHT_PROBE, SSID_SEARCHING, TITLE_GAP};
use crate::metrics_provider::MetricsProvider;
use crate::renderer::DrawSurface;
use oled_sens_types::{ConnectionKind, SizeTier};

/// Draws a screen's content given the frame writer and the metrics backend
pub type RenderFn = fn(&mut ScreenWriter<'_>, &dyn MetricsProvider);

/// Lays out a title and body lines top to bottom, starting at the border offset
pub struct ScreenWriter<'a> {
    surface: &'a mut dyn DrawSurface,
    x: i32,
    y: i32,
}

impl<'a> ScreenWriter<'a> {
    pub fn new(surface: &'a mut dyn DrawSurface, border: i32) -> Self {
        Self {
            surface,
            x: border,
            y: border,
        }
    }

    pub fn title(&mut self, text: &str) {
        self.write(text, SizeTier::Large, TITLE_GAP);
    }

    pub fn line(&mut self, text: &str) {
        self.write(text, SizeTier::Medium, LINE_GAP);
    }

    /// Top-left corner of the next line
    pub fn cursor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn write(&mut self, text: &str, tier: SizeTier, gap: i32) {
        self.surface.draw_text(self.x, self.y, text, tier);
        let (_, height) = self.surface.measure_text(LINE_HEIGHT_PROBE, tier);
        self.y += height as i32 + gap;
    }
}

pub(crate) fn render_network(writer: &mut ScreenWriter<'_>, metrics: &dyn MetricsProvider) {
    let status = metrics.network_status();
    let link = match status.kind {
        ConnectionKind::Wifi => format!("WiFi: {}", status.ssid.or_label(SSID_SEARCHING)),
        kind => format!("Type: {}", kind.label()),
    };
    writer.line(&link);
    writer.line(&format!("IP: {}", status.ip));
}

pub(crate) fn render_storage(writer: &mut ScreenWriter<'_>, metrics: &dyn MetricsProvider) {
    let status = metrics.storage_status();
    writer.line(&format!("Free: {}", status.free));
    writer.line(&format!("Used: {}", status.used_percent));
}

pub(crate) fn render_load(writer: &mut ScreenWriter<'_>, metrics: &dyn MetricsProvider) {
    let status = metrics.load_status();
    writer.line(&format!("CPU: {}", status.cpu));
    writer.line(&format!("RAM: {}", status.ram));
}

pub(crate) fn render_temperature(writer: &mut ScreenWriter<'_>, metrics: &dyn MetricsProvider) {
    writer.line(metrics.temperature().as_str());
}

pub(crate) fn render_date_time(writer: &mut ScreenWriter<'_>, metrics: &dyn MetricsProvider) {
    let status = metrics.clock();
    writer.line(status.date.as_str());
    writer.line(status.time.as_str());
}
