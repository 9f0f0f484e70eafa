//! spyll-assets: renders the SPYLL app icons, splash screens and favicons
//!
//! Every asset is drawn from scratch: a white rounded background (or a
//! full-bleed one for splash screens) with the "SPYLL" wordmark centred in the
//! brand font. The brand font is read from `public/fonts/` under the project
//! root; when it cannot render some text the bundled DejaVu Sans stands in.
//!
//! # Example
//!
//! ```
//! use spyll_assets::{AssetRenderer, BrandFont, StyleSpec, TextFit, FALLBACK_FONT};
//!
//! let font = BrandFont::from_bytes(FALLBACK_FONT.to_vec()).unwrap();
//! let renderer = AssetRenderer::new(StyleSpec::brand(), font);
//!
//! let icon = renderer.render_icon(192, "SPYLL", TextFit::Wordmark);
//! assert_eq!(icon.image.data.dimensions(), (192, 192));
//!
//! let splash = renderer.render_splash(1200, 630, "SPYLL");
//! assert!(!splash.used_fallback());
//! ```
//!
//! # Batch Generation
//!
//! [`generate`] runs the whole batch for a project root: Android launcher
//! icons and splash drawables, web icons, and (when the Xcode project exists)
//! the iOS app icon set with its `Contents.json`.
//!
//! ```no_run
//! let summary = spyll_assets::generate(std::path::Path::new(".")).unwrap();
//! println!("{summary}");
//! ```

mod error;
mod font;
mod generator;
mod icon;
mod layer;
mod manifest;
mod plan;
mod renderer;
mod style;

pub use error::{Error, Result};
pub use font::{BrandFont, FontSource, Typeface, FALLBACK_FONT};
pub use generator::{generate, AssetGenerator, Step, StepReport, Summary};
pub use icon::{AssetImage, RectPx, SizePx};
pub use layer::{
    CircleMaskConfig, FillConfig, GradientConfig, LayerEffect, LayerStack, RenderContext,
    RoundedRectConfig, TextBounds, TextConfig,
};
pub use manifest::{IconManifest, ManifestEntry, ManifestInfo};
pub use plan::{
    ensure_unique_paths, AssetPlan, DensityIcon, IosIcon, JobKind, Orientation, ProjectLayout,
    RenderJob, SplashBucket,
};
pub use renderer::{render_gradient, write, AssetRenderer, Rendered};
pub use style::{
    opaque, Color, GradientDirection, StyleSpec, TextFit, BRAND_PINK, BRAND_PINK_LIGHT, WHITE,
};
