//! Renderer traits

use anyhow::Result;
use oled_sens_types::SizeTier;

/// A monochrome frame that text can be drawn into.
pub trait DrawSurface {
    /// Frame width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Width and height of the box `text` occupies at `tier`
    fn measure_text(&self, text: &str, tier: SizeTier) -> (u32, u32);

    /// Draw `text` with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: i32, y: i32, text: &str, tier: SizeTier);
}

/// Trait for the physical output
///
/// Every redraw is a full frame: [`Renderer::begin_frame`] hands out a blank
/// frame, the caller draws into it, and [`Renderer::submit`] pushes it out.
/// Nothing is carried over between frames.
pub trait Renderer: Send {
    /// Start a fresh, blank frame
    fn begin_frame(&mut self) -> &mut dyn DrawSurface;

    /// Push the composed frame to the output
    fn submit(&mut self) -> Result<()>;

    /// Blank the output without drawing anything
    fn clear(&mut self) -> Result<()>;
}

/// Type-erased renderer for dynamic dispatch
pub type BoxedRenderer = Box<dyn Renderer>;
