//! Circular crop layer and the compositing helpers shared by other layers.
//!
//! Masking goes through `tiny_skia` (re-exported by resvg) so the circle edge
//! is anti-aliased.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{ColorU8, FillRule, Mask, PathBuilder, Pixmap, Transform};

use super::{LayerEffect, RenderContext};

// ============================================================================
// CircleMaskConfig
// ============================================================================

/// Crops the canvas to the largest circle that fits it.
///
/// Used for the Android round launcher icon, which the launcher shows through
/// a circle of the full icon size: everything outside the circle becomes fully
/// transparent, everything well inside is left untouched. Content bounds are
/// not consulted, so artwork that overhangs them survives the crop.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleMaskConfig;

impl LayerEffect for CircleMaskConfig {
    fn transform(&self, ctx: &mut RenderContext) {
        let (width, height) = ctx.image.data.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let radius = width.min(height) as f32 / 2.0;

        if let Some(masked) = mask_circle(&ctx.image.data, cx, cy, radius) {
            ctx.image.data = masked;
        }
    }
}

/// Applies an anti-aliased circular alpha mask to `img`.
///
/// Returns `None` if the canvas or the circle is degenerate.
fn mask_circle(img: &RgbaImage, cx: f32, cy: f32, radius: f32) -> Option<RgbaImage> {
    let mut pixmap = rgba_image_to_pixmap(img)?;
    let circle = PathBuilder::from_circle(cx, cy, radius)?;

    let mut mask = Mask::new(img.width(), img.height())?;
    mask.fill_path(&circle, FillRule::Winding, true, Transform::identity());
    pixmap.apply_mask(&mask);

    Some(pixmap_to_rgba_image(&pixmap))
}

// ============================================================================
// Pixmap Conversion
// ============================================================================

/// Converts an image::RgbaImage to a premultiplied tiny_skia Pixmap.
fn rgba_image_to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *dst = Rgba([r, g, b, a]);
    }
    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Alpha blends two RGBA pixels (source over destination).
pub fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
