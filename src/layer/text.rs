//! Centered text layer.
//!
//! Text is centred on its rendered ink, not on its pen origin: the glyphs are
//! laid out first, the union of their pixel bounds is measured, and the whole
//! run is shifted so that box sits in the middle of the canvas. Glyphs with
//! tall ascenders or deep descenders therefore do not push the wordmark off
//! centre.

use ab_glyph::{point, Font, FontArc, GlyphId, OutlinedGlyph, PxScale, Rect, ScaleFont};
use image::Rgba;

use super::mask::alpha_blend;
use super::{LayerEffect, RenderContext};
use crate::font::Typeface;
use crate::icon::RectPx;
use crate::style::Color;

// ============================================================================
// Properties
// ============================================================================

/// Canvas-space ink bounds of the drawn text, emitted by [`TextConfig`].
///
/// `None` when the text produced no outlines (empty or whitespace only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds(pub Option<RectPx>);

// ============================================================================
// TextConfig
// ============================================================================

/// Draws one line of text centred on the canvas.
///
/// # Emitted Properties
///
/// - [`FontSource`](crate::FontSource): which face the text was drawn with.
/// - [`TextBounds`]: where the ink landed.
#[derive(Debug, Clone)]
pub struct TextConfig {
    pub text: String,
    pub typeface: Typeface,
    /// Em size in pixels.
    pub em_px: f32,
    pub color: Color,
}

impl TextConfig {
    pub fn new(text: impl Into<String>, typeface: Typeface, em_px: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            typeface,
            em_px,
            color,
        }
    }

    /// Top-left pen offset that centres the ink box on a `width x height` canvas.
    ///
    /// Returns the offset and the ink box relative to the pen origin.
    fn placement(&self, width: u32, height: u32) -> Option<((i32, i32), Rect)> {
        let scale = self.typeface.scale_for_em(self.em_px);
        let ink = measure(&self.typeface.font, scale, &self.text)?;
        let text_w = (ink.max.x - ink.min.x) as i32;
        let text_h = (ink.max.y - ink.min.y) as i32;
        let x = (width as i32 - text_w).div_euclid(2) - ink.min.x as i32;
        let y = (height as i32 - text_h).div_euclid(2) - ink.min.y as i32;
        Some(((x, y), ink))
    }
}

impl LayerEffect for TextConfig {
    fn transform(&self, ctx: &mut RenderContext) {
        let canvas = &mut ctx.image.data;
        let (width, height) = canvas.dimensions();
        let Some(((ox, oy), _)) = self.placement(width, height) else {
            return;
        };

        let scale = self.typeface.scale_for_em(self.em_px);
        for glyph in layout(&self.typeface.font, scale, &self.text) {
            let bounds = glyph.px_bounds();
            let gx0 = ox + bounds.min.x as i32;
            let gy0 = oy + bounds.min.y as i32;
            glyph.draw(|gx, gy, coverage| {
                let x = gx0 + gx as i32;
                let y = gy0 + gy as i32;
                if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                if alpha == 0 {
                    return;
                }
                let src = Rgba([self.color.red, self.color.green, self.color.blue, alpha]);
                let dst = canvas.get_pixel_mut(x as u32, y as u32);
                *dst = alpha_blend(src, *dst);
            });
        }
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(self.typeface.source);

        let (width, height) = ctx.image.data.dimensions();
        let bounds = self.placement(width, height).map(|((ox, oy), ink)| {
            let x0 = (ox + ink.min.x as i32).max(0) as u32;
            let y0 = (oy + ink.min.y as i32).max(0) as u32;
            let x1 = ((ox + ink.max.x as i32).max(0) as u32).min(width);
            let y1 = ((oy + ink.max.y as i32).max(0) as u32).min(height);
            RectPx::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
        });
        ctx.set(TextBounds(bounds));
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Lays `text` out on one line with the baseline at the font's ascent.
///
/// Control characters are skipped; glyphs without an outline (spaces) still
/// advance the pen.
pub fn layout(font: &FontArc, scale: PxScale, text: &str) -> Vec<OutlinedGlyph> {
    let scaled = font.as_scaled(scale);
    let mut caret = point(0.0, scaled.ascent());
    let mut previous: Option<GlyphId> = None;
    let mut glyphs = Vec::new();

    for c in text.chars().filter(|c| !c.is_control()) {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret.x += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, caret);
        caret.x += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            glyphs.push(outlined);
        }
    }

    glyphs
}

/// Ink bounding box of `text` relative to the pen origin, in whole pixels.
pub fn measure(font: &FontArc, scale: PxScale, text: &str) -> Option<Rect> {
    layout(font, scale, text)
        .iter()
        .map(OutlinedGlyph::px_bounds)
        .reduce(|a, b| Rect {
            min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
            max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
        })
}
