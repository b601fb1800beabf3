//! Rasterization seam between the document core and a renderer backend.

use crate::error::CanvasResult;
use crate::scene::SceneGraph;

/// Preview pixel multiplier relative to the native canvas frame.
pub const PREVIEW_SCALE: f32 = 0.5;

/// Export pixel multiplier (1:1 physical scale).
pub const EXPORT_SCALE: f32 = 1.0;

/// Options for one rasterization pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Pixel multiplier relative to the native canvas size.
    pub scale: f32,
    /// Horizontal flip about the canvas's vertical centerline.
    pub mirror: bool,
}

impl RasterOptions {
    /// The half-resolution preview frame.
    #[must_use]
    pub const fn preview() -> Self {
        Self {
            scale: PREVIEW_SCALE,
            mirror: false,
        }
    }

    /// The native-resolution export frame.
    #[must_use]
    pub const fn export(mirror: bool) -> Self {
        Self {
            scale: EXPORT_SCALE,
            mirror,
        }
    }
}

/// Renders a scene graph to encoded PNG bytes.
///
/// Implementations rasterize the fixed canvas frame; display zoom and pan
/// never reach them. An empty graph renders as a blank canvas-colored
/// frame.
pub trait SceneRasterizer {
    /// Rasterize the scene.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CanvasError::RenderFailure`] if rasterization
    /// cannot complete (for example an unreadable embedded asset).
    fn rasterize(&self, scene: &SceneGraph, options: &RasterOptions) -> CanvasResult<Vec<u8>>;
}
