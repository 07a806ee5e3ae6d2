//! Size tier to font mapping

use embedded_graphics::mono_font::iso_8859_1::{FONT_5X8, FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::Baseline;
use oled_sens_types::SizeTier;

/// Latin-1 fonts so labels like "°C" render
pub fn font_for(tier: SizeTier) -> &'static MonoFont<'static> {
    match tier {
        SizeTier::Large => &FONT_9X15_BOLD,
        SizeTier::Medium => &FONT_6X10,
        SizeTier::Small => &FONT_5X8,
    }
}

pub(crate) fn style_for(tier: SizeTier) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(font_for(tier), BinaryColor::On)
}

/// Pixel box `text` occupies when drawn top-left anchored
pub fn text_size(text: &str, tier: SizeTier) -> Size {
    style_for(tier)
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_size_per_tier() {
        assert_eq!(text_size("Network:", SizeTier::Large), Size::new(72, 15));
        assert_eq!(text_size("IP: 1.2.3.4", SizeTier::Medium), Size::new(66, 10));
        assert_eq!(text_size("3/5", SizeTier::Small), Size::new(15, 8));
    }

    #[test]
    fn test_degree_sign_is_one_glyph() {
        assert_eq!(text_size("48.3°C", SizeTier::Medium).width, 36);
    }
}
