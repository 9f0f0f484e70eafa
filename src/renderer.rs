//! The asset renderer: icons, round icons, splash screens and gradients.
//!
//! Each render is a pure function of its inputs. The renderer owns only
//! read-only state (the style and the brand font) so the same instance can be
//! reused across an entire batch.

use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::font::{BrandFont, FontSource};
use crate::icon::{AssetImage, SizePx};
use crate::layer::{
    CircleMaskConfig, FillConfig, GradientConfig, LayerStack, RenderContext, RoundedRectConfig,
    TextConfig,
};
use crate::style::{Color, GradientDirection, StyleSpec, TextFit};

/// A rendered image together with the face its text was drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub image: AssetImage,
    pub font: FontSource,
}

impl Rendered {
    fn from_context(ctx: RenderContext) -> Self {
        let font = ctx.get::<FontSource>().copied().unwrap_or(FontSource::Brand);
        Self {
            image: ctx.image,
            font,
        }
    }

    /// Returns true if the fallback font stood in for the brand font.
    pub fn used_fallback(&self) -> bool {
        self.font == FontSource::Fallback
    }
}

/// Draws brand assets with a fixed style and font.
pub struct AssetRenderer {
    style: StyleSpec,
    font: BrandFont,
}

impl AssetRenderer {
    pub fn new(style: StyleSpec, font: BrandFont) -> Self {
        Self { style, font }
    }

    pub fn style(&self) -> &StyleSpec {
        &self.style
    }

    pub fn font(&self) -> &BrandFont {
        &self.font
    }

    /// Square icon: rounded background inset by the padding, text centred.
    pub fn render_icon(&self, size: u32, text: &str, fit: TextFit) -> Rendered {
        Rendered::from_context(self.icon_stack(size, text, fit).render(AssetImage::blank(
            SizePx::square(size),
        )))
    }

    /// The icon from [`render_icon`](Self::render_icon) cropped to the circle
    /// inscribed in the canvas.
    pub fn render_round_icon(&self, size: u32, text: &str, fit: TextFit) -> Rendered {
        let stack = self.icon_stack(size, text, fit).with(CircleMaskConfig);
        Rendered::from_context(stack.render(AssetImage::blank(SizePx::square(size))))
    }

    /// Full-bleed background with the text centred at a quarter of the
    /// shorter side.
    pub fn render_splash(&self, width: u32, height: u32, text: &str) -> Rendered {
        let em_px = self.style.splash_font_px(width, height) as f32;
        let stack = LayerStack::new()
            .with(FillConfig::new(self.style.background))
            .with(TextConfig::new(
                text,
                self.font.select(text),
                em_px,
                self.style.text,
            ));
        Rendered::from_context(stack.render(AssetImage::blank(SizePx::new(width, height))))
    }

    fn icon_stack(&self, size: u32, text: &str, fit: TextFit) -> LayerStack {
        let em_px = self.style.icon_font_px(size, fit) as f32;
        LayerStack::new()
            .with(RoundedRectConfig::new(
                self.style.background,
                self.style.padding(size),
                self.style.corner_radius(size),
            ))
            .with(TextConfig::new(
                text,
                self.font.select(text),
                em_px,
                self.style.text,
            ))
    }
}

/// A `width x height` linear gradient from `start` to `end`.
pub fn render_gradient(
    width: u32,
    height: u32,
    start: Color,
    end: Color,
    direction: GradientDirection,
) -> AssetImage {
    LayerStack::new()
        .with(GradientConfig::new(start, end, direction))
        .render(AssetImage::blank(SizePx::new(width, height)))
        .image
}

/// Writes `image` to `path` as PNG or ICO, chosen by extension.
///
/// Missing parent directories are created first.
pub fn write(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Ico)) => format,
        _ => {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    image
        .save_with_format(path, format)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })
}
