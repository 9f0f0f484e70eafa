//! Brand colors and the sizing ratios every asset is drawn with.

use image::Rgba;
use palette::Srgb;

/// An opaque sRGB color with 8-bit channels.
pub type Color = Srgb<u8>;

pub const WHITE: Color = Srgb::new(255, 255, 255);

/// `#FF5973`, the main brand pink used for the wordmark.
pub const BRAND_PINK: Color = Srgb::new(255, 89, 115);

/// `#FF6BA0`, the light end of the website's pink gradient.
pub const BRAND_PINK_LIGHT: Color = Srgb::new(255, 107, 160);

/// Converts a color to an opaque RGBA pixel.
pub fn opaque(color: Color) -> Rgba<u8> {
    Rgba([color.red, color.green, color.blue, 255])
}

/// How large the text is drawn relative to an icon's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFit {
    /// The full wordmark ("SPYLL").
    Wordmark,
    /// A single letter monogram.
    Glyph,
}

/// Axis a gradient runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientDirection {
    /// Top to bottom: one color per row.
    #[default]
    Vertical,
    /// Left to right: one color per column.
    Horizontal,
}

/// Fixed styling shared by all render jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    pub background: Color,
    pub text: Color,
    /// Corner radius as a fraction of the icon side.
    pub corner_radius_ratio: f32,
    /// Padding on every edge as a fraction of the icon side.
    pub padding_ratio: f32,
    /// Font em size for [`TextFit::Wordmark`] as a fraction of the icon side.
    pub wordmark_ratio: f32,
    /// Font em size for [`TextFit::Glyph`] as a fraction of the icon side.
    pub glyph_ratio: f32,
    /// Splash font size is the shorter side divided by this.
    pub splash_divisor: u32,
}

impl StyleSpec {
    /// White background, pink text.
    pub fn brand() -> Self {
        Self {
            background: WHITE,
            text: BRAND_PINK,
            corner_radius_ratio: 0.22,
            padding_ratio: 0.08,
            wordmark_ratio: 0.32,
            glyph_ratio: 0.55,
            splash_divisor: 4,
        }
    }

    pub fn corner_radius(&self, size: u32) -> u32 {
        (size as f32 * self.corner_radius_ratio).round() as u32
    }

    pub fn padding(&self, size: u32) -> u32 {
        (size as f32 * self.padding_ratio).round() as u32
    }

    /// Font em size in pixels for an icon of side `size`.
    pub fn icon_font_px(&self, size: u32, fit: TextFit) -> u32 {
        let ratio = match fit {
            TextFit::Wordmark => self.wordmark_ratio,
            TextFit::Glyph => self.glyph_ratio,
        };
        (size as f32 * ratio) as u32
    }

    /// Font em size in pixels for a splash of the given dimensions.
    pub fn splash_font_px(&self, width: u32, height: u32) -> u32 {
        width.min(height) / self.splash_divisor.max(1)
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self::brand()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_geometry_for_192() {
        let style = StyleSpec::brand();
        assert_eq!(style.corner_radius(192), 42);
        assert_eq!(style.padding(192), 15);
        assert_eq!(style.icon_font_px(192, TextFit::Wordmark), 61);
        assert_eq!(style.icon_font_px(192, TextFit::Glyph), 105);
    }

    #[test]
    fn geometry_rounds_to_nearest() {
        let style = StyleSpec::brand();
        // 48 * 0.22 = 10.56
        assert_eq!(style.corner_radius(48), 11);
        // 72 * 0.08 = 5.76
        assert_eq!(style.padding(72), 6);
    }

    #[test]
    fn splash_font_uses_shorter_side() {
        let style = StyleSpec::brand();
        assert_eq!(style.splash_font_px(1200, 630), 157);
        assert_eq!(style.splash_font_px(480, 800), 120);
    }

    #[test]
    fn opaque_pixel() {
        assert_eq!(opaque(BRAND_PINK).0, [255, 89, 115, 255]);
    }
}
