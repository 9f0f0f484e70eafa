//! Layer infrastructure for asset rendering.
//!
//! An asset is drawn by passing a blank canvas through a short stack of
//! layers: a background, optionally the brand text, optionally a mask.
//!
//! # Architecture
//!
//! Each layer config implements [`LayerEffect`], which defines:
//! - How the layer draws itself onto the canvas
//! - What properties it emits for downstream layers and for the caller
//!
//! Properties flow through the stack via [`RenderContext`]. The text layer,
//! for example, emits the [`FontSource`](crate::FontSource) it used so the
//! renderer can report fallback substitution without parsing logs.

pub mod background;
pub mod gradient;
pub mod mask;
pub mod text;

pub use background::{FillConfig, RoundedRectConfig};
pub use gradient::GradientConfig;
pub use mask::CircleMaskConfig;
pub use text::{TextBounds, TextConfig};

use crate::icon::AssetImage;
use std::any::{Any, TypeId};
use std::collections::HashMap;

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the layer stack.
///
/// Layers can read properties set by upstream layers and emit new properties
/// for downstream layers (or the caller) to consume.
///
/// # Example
///
/// ```ignore
/// // The text layer records the face it drew with
/// ctx.set(FontSource::Fallback);
///
/// // The renderer reads it back after the stack ran
/// let source = ctx.get::<FontSource>().copied();
/// ```
pub struct RenderContext {
    /// The canvas being drawn on.
    pub image: AssetImage,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    /// Creates a new render context around the given canvas.
    pub fn new(image: AssetImage) -> Self {
        Self {
            image,
            properties: HashMap::new(),
        }
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// Checks if a property has been set.
    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<T>())
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// Trait for layer configurations that know how to apply themselves.
///
/// The separation of [`transform`](Self::transform) and [`emit`](Self::emit)
/// provides a canonical place for property emission and makes the data flow
/// explicit.
pub trait LayerEffect {
    /// Draw onto `ctx.image`, reading upstream properties as needed.
    fn transform(&self, ctx: &mut RenderContext);

    /// Emit properties for downstream layers to consume.
    ///
    /// Called after [`transform`](Self::transform). The default implementation
    /// emits nothing.
    fn emit(&self, _ctx: &mut RenderContext) {}
}

// ============================================================================
// Layer Stack
// ============================================================================

/// An ordered list of layers applied bottom to top.
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Box<dyn LayerEffect>>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer on top of the existing ones.
    pub fn with(mut self, layer: impl LayerEffect + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Runs every layer over `canvas` and returns the finished context.
    pub fn render(&self, canvas: AssetImage) -> RenderContext {
        let mut ctx = RenderContext::new(canvas);
        for layer in &self.layers {
            layer.transform(&mut ctx);
            layer.emit(&mut ctx);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::SizePx;
    use crate::style::{BRAND_PINK, WHITE};

    #[derive(Debug, PartialEq)]
    struct Marker(u32);

    struct EmitMarker(u32);

    impl LayerEffect for EmitMarker {
        fn transform(&self, _ctx: &mut RenderContext) {}

        fn emit(&self, ctx: &mut RenderContext) {
            ctx.set(Marker(self.0));
        }
    }

    #[test]
    fn context_property_bag() {
        let mut ctx = RenderContext::new(AssetImage::blank(SizePx::square(2)));
        assert!(!ctx.has::<Marker>());
        ctx.set(Marker(1));
        assert_eq!(ctx.get::<Marker>(), Some(&Marker(1)));
        ctx.set(Marker(2));
        assert_eq!(ctx.get::<Marker>(), Some(&Marker(2)));
    }

    #[test]
    fn stack_applies_layers_in_order() {
        let stack = LayerStack::new()
            .with(FillConfig::new(WHITE))
            .with(FillConfig::new(BRAND_PINK))
            .with(EmitMarker(7));
        assert_eq!(stack.len(), 3);

        let ctx = stack.render(AssetImage::blank(SizePx::square(4)));
        assert_eq!(ctx.image.data.get_pixel(0, 0).0, [255, 89, 115, 255]);
        assert_eq!(ctx.get::<Marker>(), Some(&Marker(7)));
    }

    #[test]
    fn empty_stack_returns_canvas_untouched() {
        let stack = LayerStack::new();
        assert!(stack.is_empty());
        let ctx = stack.render(AssetImage::blank(SizePx::square(3)));
        assert!(ctx.image.data.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
