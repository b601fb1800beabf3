//! Display-only viewport state and container fit.
//!
//! Nothing here ever reaches the scene graph or the export frame: zoom and
//! pan exist purely for on-screen presentation of the fixed-pixel canvas.

use serde::{Deserialize, Serialize};

use crate::dimensions;

/// Padding reserved around the fitted canvas, in container pixels.
const FIT_PADDING_PX: f32 = 40.0;

/// On-screen presentation state for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayViewport {
    /// Display zoom (1.0 = 100%).
    pub zoom: f32,
    /// Horizontal pan offset in screen pixels.
    pub pan_x: f32,
    /// Vertical pan offset in screen pixels.
    pub pan_y: f32,
}

impl Default for DisplayViewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Compute the display scale that fits the canvas into a container.
///
/// `min((w - padding) / canvas_w, (h - padding) / canvas_h, 1.0)` - the
/// canvas is never upscaled past 100%. Returns `None` for degenerate
/// container sizes (zero or smaller than the padding) so callers skip the
/// update instead of propagating `NaN` or infinity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_fit_scale(container_width: f32, container_height: f32) -> Option<f32> {
    if container_width <= FIT_PADDING_PX || container_height <= FIT_PADDING_PX {
        return None;
    }
    let scale_x = (container_width - FIT_PADDING_PX) / dimensions::canvas_width_px() as f32;
    let scale_y = (container_height - FIT_PADDING_PX) / dimensions::canvas_height_px() as f32;
    Some(scale_x.min(scale_y).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_container_caps_at_one() {
        let scale = compute_fit_scale(10_000.0, 10_000.0).expect("fit");
        assert!((scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_small_container_scales_down() {
        // 1280x640 container: width-bound = (1280-40)/2480 = 0.5
        let scale = compute_fit_scale(1280.0, 4000.0).expect("fit");
        assert!((scale - 0.5).abs() < 1e-4);
        assert!(scale < 1.0);
    }

    #[test]
    fn test_height_bound_container() {
        // Height is the tighter constraint here.
        let scale = compute_fit_scale(10_000.0, 571.5).expect("fit");
        assert!((scale - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_container_skips_update() {
        assert!(compute_fit_scale(0.0, 600.0).is_none());
        assert!(compute_fit_scale(800.0, 0.0).is_none());
        assert!(compute_fit_scale(40.0, 40.0).is_none());
    }

    #[test]
    fn test_result_is_finite_and_positive() {
        let scale = compute_fit_scale(41.0, 41.0).expect("fit");
        assert!(scale.is_finite());
        assert!(scale > 0.0);
    }

    #[test]
    fn test_default_viewport_is_identity() {
        let viewport = DisplayViewport::default();
        assert!((viewport.zoom - 1.0).abs() < f32::EPSILON);
        assert!(viewport.pan_x.abs() < f32::EPSILON);
        assert!(viewport.pan_y.abs() < f32::EPSILON);
    }
}
