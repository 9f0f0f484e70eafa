//! Solid and rounded-rectangle background layers.

use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use super::{LayerEffect, RenderContext};
use crate::style::{opaque, Color};

// ============================================================================
// FillConfig
// ============================================================================

/// Paints the whole canvas with one opaque color.
#[derive(Debug, Clone)]
pub struct FillConfig {
    pub color: Color,
}

impl FillConfig {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl LayerEffect for FillConfig {
    fn transform(&self, ctx: &mut RenderContext) {
        let pixel = opaque(self.color);
        for p in ctx.image.data.pixels_mut() {
            *p = pixel;
        }
    }
}

// ============================================================================
// RoundedRectConfig
// ============================================================================

/// A filled rounded rectangle inset from every canvas edge.
///
/// The rectangle covers `[padding, side - padding)` on both axes and each
/// corner is a filled disk of `radius`. Pixels outside keep whatever the
/// canvas held (transparent for icons). The content bounds of the image are
/// set to the rectangle.
#[derive(Debug, Clone)]
pub struct RoundedRectConfig {
    pub color: Color,
    pub padding: u32,
    pub radius: u32,
}

impl RoundedRectConfig {
    pub fn new(color: Color, padding: u32, radius: u32) -> Self {
        Self {
            color,
            padding,
            radius,
        }
    }
}

impl LayerEffect for RoundedRectConfig {
    fn transform(&self, ctx: &mut RenderContext) {
        let canvas = &mut ctx.image.data;
        let full = crate::icon::RectPx::from_size(canvas.width(), canvas.height());
        let bounds = full.inset(self.padding);
        ctx.image.content_bounds = bounds;

        if bounds.is_empty() {
            return;
        }

        let color = opaque(self.color);
        let r = self.radius.min(bounds.width / 2).min(bounds.height / 2);
        let (x0, y0) = (bounds.x as i32, bounds.y as i32);
        let (x1, y1) = (bounds.right() as i32 - 1, bounds.bottom() as i32 - 1);
        let ri = r as i32;

        // Horizontal band between the top and bottom corner rows.
        if bounds.height > 2 * r {
            draw_filled_rect_mut(
                canvas,
                Rect::at(x0, y0 + ri).of_size(bounds.width, bounds.height - 2 * r),
                color,
            );
        }
        // Vertical band between the left and right corner columns.
        if bounds.width > 2 * r {
            draw_filled_rect_mut(
                canvas,
                Rect::at(x0 + ri, y0).of_size(bounds.width - 2 * r, bounds.height),
                color,
            );
        }
        if r > 0 {
            for center in [
                (x0 + ri, y0 + ri),
                (x1 - ri, y0 + ri),
                (x0 + ri, y1 - ri),
                (x1 - ri, y1 - ri),
            ] {
                draw_filled_circle_mut(canvas, center, ri, color);
            }
        }
    }
}
