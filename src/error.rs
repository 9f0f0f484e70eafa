//! Error type shared by the renderer and the batch generator.

use std::io;
use std::path::PathBuf;

/// Everything that can abort asset generation.
///
/// Per-call font degradation is not an error. It is reported through
/// [`FontSource::Fallback`](crate::FontSource::Fallback) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The brand font does not exist at any candidate location.
    #[error("brand font not found at {}; expected Liquids.ttf or Liquids.otf", path.display())]
    FontMissing { path: PathBuf },

    /// The brand font exists but could not be read.
    #[error("failed to read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bundled fallback font could not be parsed.
    #[error("bundled fallback font is unreadable: {0}")]
    FallbackFont(#[from] ab_glyph::InvalidFont),

    /// An output directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Encoding or writing an image failed.
    #[error("failed to write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output extension is neither `.png` nor `.ico`.
    #[error("unsupported output format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The iOS `Contents.json` descriptor could not be written.
    #[error("failed to write manifest {}: {source}", path.display())]
    WriteManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A plan or manifest could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Two jobs in the same step target one path.
    #[error("more than one job writes {}", path.display())]
    DuplicateOutput { path: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
