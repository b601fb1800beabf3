//! # Mug Print Studio Renderer
//!
//! CPU rasterizer for the mug canvas: the scene graph is projected to an
//! SVG intermediate representation and rasterized with resvg/tiny-skia,
//! producing the half-resolution preview and the print-correct export PNG.
//!
//! The conditional horizontal mirror for sublimation transfer is applied as
//! an in-place column swap on the finished pixmap, so the mirrored raster
//! is the exact pixel reflection of the unmirrored one.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod svg;

pub use error::{RenderError, RenderResult};

use std::sync::Arc;

use mug_core::node::NodeKind;
use mug_core::render::{RasterOptions, SceneRasterizer};
use mug_core::scene::SceneGraph;
use mug_core::{CanvasError, CanvasResult};

/// CPU rasterizer implementing the core's [`SceneRasterizer`] seam.
///
/// Holds a font database loaded once from the system so repeated preview
/// renders don't rescan fonts.
pub struct PixmapRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl PixmapRasterizer {
    /// Create a rasterizer with the system font set.
    #[must_use]
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Rasterize the scene to a pixmap.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded asset is unreadable, the SVG
    /// projection fails to parse, or the pixel buffer cannot be allocated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render_pixmap(
        &self,
        scene: &SceneGraph,
        options: &RasterOptions,
    ) -> RenderResult<tiny_skia::Pixmap> {
        check_assets(scene)?;

        tracing::debug!(
            nodes = scene.len(),
            scale = options.scale,
            mirror = options.mirror,
            "rasterizing scene"
        );

        let svg_string = svg::scene_to_svg(scene, options.scale);
        let opt = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg_string, &opt)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let px_w = tree.size().width() as u32;
        let px_h = tree.size().height() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Frame("failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        if options.mirror {
            mirror_horizontal(&mut pixmap);
        }

        Ok(pixmap)
    }
}

impl Default for PixmapRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRasterizer for PixmapRasterizer {
    fn rasterize(&self, scene: &SceneGraph, options: &RasterOptions) -> CanvasResult<Vec<u8>> {
        let pixmap = self.render_pixmap(scene, options)?;
        pixmap
            .encode_png()
            .map_err(|e| CanvasError::from(RenderError::Encode(e.to_string())))
    }
}

/// Validate every embedded image asset up front, so an unreadable raster
/// fails the whole pass instead of silently rendering a hole.
fn check_assets(scene: &SceneGraph) -> RenderResult<()> {
    for node in scene.nodes() {
        if let NodeKind::Image { asset } = &node.kind {
            let bytes = asset
                .png_bytes()
                .map_err(|e| RenderError::Resource(e.to_string()))?;
            image::load_from_memory(&bytes)
                .map_err(|e| RenderError::Resource(e.to_string()))?;
        }
    }
    Ok(())
}

/// Flip the pixmap about its vertical centerline in place.
fn mirror_horizontal(pixmap: &mut tiny_skia::Pixmap) {
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    for y in 0..height {
        let row = &mut data[y * width * 4..(y + 1) * width * 4];
        for x in 0..width / 2 {
            let left = x * 4;
            let right = (width - 1 - x) * 4;
            for offset in 0..4 {
                row.swap(left + offset, right + offset);
            }
        }
    }
}
