//! Full-frame text renderer over a monochrome draw target

use crate::fonts::{style_for, text_size};
use anyhow::Result;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use oled_sens_core::{DrawSurface, Renderer};
use oled_sens_types::SizeTier;

/// A monochrome display with an off-screen buffer
pub trait Panel: DrawTarget<Color = BinaryColor> + OriginDimensions {
    /// Blank the buffer without touching the hardware
    fn clear_frame(&mut self);

    /// Push the buffer to the hardware
    fn flush_frame(&mut self) -> Result<()>;
}

pub struct FrameRenderer<P> {
    panel: P,
}

impl<P: Panel> FrameRenderer<P> {
    pub fn new(panel: P) -> Self {
        Self { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

impl<P: Panel> DrawSurface for FrameRenderer<P> {
    fn dimensions(&self) -> (u32, u32) {
        let size = self.panel.size();
        (size.width, size.height)
    }

    fn measure_text(&self, text: &str, tier: SizeTier) -> (u32, u32) {
        let size = text_size(text, tier);
        (size.width, size.height)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, tier: SizeTier) {
        // Pixels outside the panel are dropped by the target
        let _ = Text::with_baseline(text, Point::new(x, y), style_for(tier), Baseline::Top)
            .draw(&mut self.panel);
    }
}

impl<P: Panel + Send> Renderer for FrameRenderer<P> {
    fn begin_frame(&mut self) -> &mut dyn DrawSurface {
        self.panel.clear_frame();
        self
    }

    fn submit(&mut self) -> Result<()> {
        self.panel.flush_frame()
    }

    fn clear(&mut self) -> Result<()> {
        self.panel.clear_frame();
        self.panel.flush_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::convert::Infallible;

    const WIDTH: usize = 128;
    const HEIGHT: usize = 64;

    /// In-memory 128x64 panel
    struct MemoryPanel {
        buffer: Vec<bool>,
        shown: Vec<bool>,
        flushes: usize,
        fail_flush: bool,
    }

    impl MemoryPanel {
        fn new() -> Self {
            Self {
                buffer: vec![false; WIDTH * HEIGHT],
                shown: vec![false; WIDTH * HEIGHT],
                flushes: 0,
                fail_flush: false,
            }
        }

        fn lit(pixels: &[bool]) -> usize {
            pixels.iter().filter(|on| **on).count()
        }

        /// Lit pixels on screen inside the given rectangle
        fn lit_in(&self, x: usize, y: usize, w: usize, h: usize) -> usize {
            (y..y + h)
                .flat_map(|row| (x..x + w).map(move |col| row * WIDTH + col))
                .filter(|i| self.shown[*i])
                .count()
        }
    }

    impl OriginDimensions for MemoryPanel {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for MemoryPanel {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                    self.buffer[point.y as usize * WIDTH + point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    impl Panel for MemoryPanel {
        fn clear_frame(&mut self) {
            self.buffer.iter_mut().for_each(|p| *p = false);
        }

        fn flush_frame(&mut self) -> anyhow::Result<()> {
            if self.fail_flush {
                return Err(anyhow!("I2C write failed"));
            }
            self.shown.copy_from_slice(&self.buffer);
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_nothing_shows_until_submit() {
        let mut renderer = FrameRenderer::new(MemoryPanel::new());
        renderer.begin_frame().draw_text(5, 5, "Network:", SizeTier::Large);
        assert_eq!(MemoryPanel::lit(&renderer.panel().shown), 0);
        renderer.submit().unwrap();
        assert!(renderer.panel().lit_in(5, 5, 72, 15) > 0);
        assert_eq!(renderer.panel().lit_in(0, 30, WIDTH, 34), 0);
    }

    #[test]
    fn test_begin_frame_starts_blank() {
        let mut renderer = FrameRenderer::new(MemoryPanel::new());
        renderer.begin_frame().draw_text(0, 0, "old", SizeTier::Medium);
        renderer.submit().unwrap();
        renderer.begin_frame().draw_text(0, 40, "new", SizeTier::Medium);
        renderer.submit().unwrap();
        assert_eq!(renderer.panel().lit_in(0, 0, WIDTH, 20), 0);
        assert!(renderer.panel().lit_in(0, 40, 18, 10) > 0);
    }

    #[test]
    fn test_clear_blanks_and_flushes() {
        let mut renderer = FrameRenderer::new(MemoryPanel::new());
        renderer.begin_frame().draw_text(0, 0, "x", SizeTier::Large);
        renderer.submit().unwrap();
        renderer.clear().unwrap();
        assert_eq!(MemoryPanel::lit(&renderer.panel().shown), 0);
        assert_eq!(renderer.panel().flushes, 2);
    }

    #[test]
    fn test_offscreen_text_is_clipped() {
        let mut renderer = FrameRenderer::new(MemoryPanel::new());
        renderer.begin_frame().draw_text(120, 60, "overflow", SizeTier::Large);
        assert!(renderer.submit().is_ok());
    }

    #[test]
    fn test_flush_failure_propagates() {
        let mut panel = MemoryPanel::new();
        panel.fail_flush = true;
        let mut renderer = FrameRenderer::new(panel);
        assert!(renderer.submit().is_err());
        assert!(renderer.clear().is_err());
    }

    #[test]
    fn test_surface_metrics() {
        let renderer = FrameRenderer::new(MemoryPanel::new());
        assert_eq!(renderer.dimensions(), (128, 64));
        assert_eq!(renderer.measure_text("1/5", SizeTier::Small), (15, 8));
    }
}
