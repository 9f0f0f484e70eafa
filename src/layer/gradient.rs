//! Linear two-color gradient layer.

use image::Rgba;
use palette::{Mix, Srgb};

use super::{LayerEffect, RenderContext};
use crate::style::{Color, GradientDirection};

/// Fills the canvas with a linear gradient, one color per scanline.
///
/// Row (or column) `i` of `n` gets `start + (end - start) * i / (n - 1)`, so the
/// first scanline is exactly `start` and the last exactly `end`.
#[derive(Debug, Clone)]
pub struct GradientConfig {
    pub start: Color,
    pub end: Color,
    pub direction: GradientDirection,
}

impl GradientConfig {
    pub fn new(start: Color, end: Color, direction: GradientDirection) -> Self {
        Self {
            start,
            end,
            direction,
        }
    }

    /// Color of scanline `index` out of `count`.
    pub fn color_at(&self, index: u32, count: u32) -> Color {
        let t = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        interpolate(self.start, self.end, t)
    }
}

impl LayerEffect for GradientConfig {
    fn transform(&self, ctx: &mut RenderContext) {
        let canvas = &mut ctx.image.data;
        let (width, height) = canvas.dimensions();
        let count = match self.direction {
            GradientDirection::Vertical => height,
            GradientDirection::Horizontal => width,
        };

        let scanlines: Vec<Rgba<u8>> = (0..count)
            .map(|i| {
                let c = self.color_at(i, count);
                Rgba([c.red, c.green, c.blue, 255])
            })
            .collect();

        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            let i = match self.direction {
                GradientDirection::Vertical => y,
                GradientDirection::Horizontal => x,
            };
            *pixel = scanlines[i as usize];
        }
    }
}

/// Linearly interpolates each RGB channel, `t` clamped to `0.0..=1.0`.
pub fn interpolate(start: Color, end: Color, t: f32) -> Color {
    let a: Srgb<f32> = start.into_format();
    let b: Srgb<f32> = end.into_format();
    a.mix(b, t.clamp(0.0, 1.0)).into_format()
}
