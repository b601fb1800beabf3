//! Embedded raster assets.
//!
//! Image nodes carry their pixels as a base64 PNG data URI, so a snapshot
//! is self-contained and restoring it never depends on the original upload
//! being available again.

use std::io::Cursor;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A self-contained raster reference for an image node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Native pixel width.
    pub width: u32,
    /// Native pixel height.
    pub height: u32,
    /// Pixels re-encoded as a `data:image/png;base64,` URI.
    pub data: String,
}

impl ImageAsset {
    /// Decode user-supplied raster bytes and embed them as PNG.
    ///
    /// Accepts any format the `image` crate can sniff (PNG, JPEG, WebP, ...);
    /// the stored form is always PNG.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ImageDecode`] if the bytes are not a readable
    /// image or cannot be re-encoded.
    pub fn from_bytes(bytes: &[u8]) -> CanvasResult<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| CanvasError::ImageDecode(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());

        let mut png = Cursor::new(Vec::new());
        decoded
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| CanvasError::ImageDecode(e.to_string()))?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(png.into_inner());
        Ok(Self {
            width,
            height,
            data: format!("{DATA_URI_PREFIX}{encoded}"),
        })
    }

    /// The embedded data URI.
    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data
    }

    /// Recover the embedded PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ImageDecode`] if the stored data is not a
    /// valid PNG data URI.
    pub fn png_bytes(&self) -> CanvasResult<Vec<u8>> {
        let payload = self
            .data
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or_else(|| CanvasError::ImageDecode("not a PNG data URI".to_string()))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| CanvasError::ImageDecode(e.to_string()))
    }
}
