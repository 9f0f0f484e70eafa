//! Brand font loading and per-call font selection.
//!
//! The brand font must exist on disk before anything is rendered. Once it
//! exists, every draw call asks [`BrandFont::select`] for a [`Typeface`]; when
//! the brand face is unusable for that text the bundled fallback is handed out
//! instead and the returned [`FontSource`] records the substitution.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale};
use log::warn;

use crate::error::{Error, Result};

/// DejaVu Sans, compiled into the binary.
pub static FALLBACK_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Which face a render call actually drew its text with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    /// The requested brand font.
    Brand,
    /// The bundled fallback font.
    Fallback,
}

/// A font chosen for one draw call.
#[derive(Clone)]
pub struct Typeface {
    pub font: FontArc,
    pub source: FontSource,
}

impl Typeface {
    /// Returns the `ab_glyph` scale whose em square is `em_px` pixels tall.
    ///
    /// `PxScale` measures ascent minus descent, so the em size has to be
    /// converted through the face's units-per-em.
    pub fn scale_for_em(&self, em_px: f32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        PxScale::from(em_px * self.font.height_unscaled() / units_per_em)
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// The brand font plus the fallback it degrades to.
pub struct BrandFont {
    path: Option<PathBuf>,
    brand: Option<FontArc>,
    fallback: FontArc,
}

impl BrandFont {
    /// Returns the first candidate that exists on disk.
    ///
    /// Fails with [`Error::FontMissing`] naming the preferred candidate.
    pub fn locate(candidates: &[PathBuf]) -> Result<PathBuf> {
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| Error::FontMissing {
                path: candidates.first().cloned().unwrap_or_default(),
            })
    }

    /// Reads the brand font from `path`.
    ///
    /// A missing file is fatal. A file that exists but does not parse is not:
    /// the returned font falls back on every draw call.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::FontMissing {
                path: path.to_path_buf(),
            },
            _ => Error::FontRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut font = Self::from_bytes(bytes)?;
        font.path = Some(path.to_path_buf());
        Ok(font)
    }

    /// Builds a brand font from raw TrueType/OpenType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let fallback = FontArc::try_from_slice(FALLBACK_FONT)?;
        let brand = match FontArc::try_from_vec(bytes) {
            Ok(font) => Some(font),
            Err(err) => {
                warn!("Brand font could not be parsed ({err}); text will use the fallback font");
                None
            }
        };

        Ok(Self {
            path: None,
            brand,
            fallback,
        })
    }

    /// Where the brand font was read from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true if the brand face parsed successfully.
    pub fn is_usable(&self) -> bool {
        self.brand.is_some()
    }

    /// Picks the face to draw `text` with.
    ///
    /// The brand face is used only when it parsed and has a glyph for every
    /// visible character of `text`.
    pub fn select(&self, text: &str) -> Typeface {
        match &self.brand {
            Some(font) => match missing_glyph(font, text) {
                None => Typeface {
                    font: font.clone(),
                    source: FontSource::Brand,
                },
                Some(c) => {
                    warn!("Brand font has no glyph for {c:?} in {text:?}, using default font");
                    self.fallback()
                }
            },
            None => {
                warn!("Could not use brand font for {text:?}, using default font");
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Typeface {
        Typeface {
            font: self.fallback.clone(),
            source: FontSource::Fallback,
        }
    }
}

/// First visible character the font cannot map to a glyph.
fn missing_glyph(font: &FontArc, text: &str) -> Option<char> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .find(|&c| font.glyph_id(c).0 == 0)
}
