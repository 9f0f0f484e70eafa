//! Pixel geometry and the rendered image type.
//!
//! Every generated asset is an [`AssetImage`]: an RGBA buffer plus the region
//! that holds the visible artwork (the padded rounded rectangle for icons, the
//! whole canvas for splash screens).

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Returns the right edge coordinate (x + width), exclusive.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height), exclusive.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Shrinks the rectangle by `amount` on all four edges.
    ///
    /// Saturates to an empty rectangle centred on the original one when the
    /// inset exceeds half of a side.
    pub fn inset(&self, amount: u32) -> Self {
        let dx = amount.min(self.width / 2);
        let dy = amount.min(self.height / 2);
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2 * dx,
            height: self.height - 2 * dy,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A 2D size in pixel units.
///
/// Icons are square; splash screens and the social preview image are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square size, as used by every icon.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

impl std::fmt::Display for SizePx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rendered asset with its associated metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,

    /// The region within the image that contains the actual artwork.
    ///
    /// For icons this is the padded background; text is still centred on the
    /// full canvas, which coincides with the centre of these bounds.
    pub content_bounds: RectPx,
}

impl AssetImage {
    /// Creates a new asset image with the given data and content bounds.
    pub fn new(data: RgbaImage, content_bounds: RectPx) -> Self {
        Self {
            data,
            content_bounds,
        }
    }

    /// Creates a new asset image assuming content fills the entire image.
    pub fn new_full_content(data: RgbaImage) -> Self {
        let content_bounds = RectPx::from_size(data.width(), data.height());
        Self::new(data, content_bounds)
    }

    /// A fully transparent canvas of the given size.
    pub fn blank(size: SizePx) -> Self {
        Self::new_full_content(RgbaImage::new(size.width, size.height))
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }
}
