//! The `Contents.json` descriptor of an Xcode app icon set.
//!
//! ```json
//! {
//!   "images": [
//!     { "filename": "icon-20@1x.png", "idiom": "universal", "platform": "ios",
//!       "size": "20x20", "scale": "1x" }
//!   ],
//!   "info": { "author": "xcode", "version": 1 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::plan::IosIcon;

/// One image of the icon set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    pub idiom: String,
    pub platform: String,
    /// Nominal size in points, `"83.5x83.5"`.
    pub size: String,
    /// Pixel density, `"2x"`.
    pub scale: String,
}

impl From<&IosIcon> for ManifestEntry {
    fn from(icon: &IosIcon) -> Self {
        let nominal = icon.nominal();
        Self {
            filename: icon.filename(),
            idiom: "universal".to_string(),
            platform: "ios".to_string(),
            size: format!("{nominal}x{nominal}"),
            scale: format!("{}x", icon.scale),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

/// Accumulates entries while icons are written, serialized once at the end.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconManifest {
    pub images: Vec<ManifestEntry>,
    pub info: ManifestInfo,
}

impl IconManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.images.push(entry);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Pretty-printed with two-space indentation, as Xcode writes it.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes the descriptor to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| Error::WriteManifest {
            path: path.to_path_buf(),
            source,
        })
    }
}
