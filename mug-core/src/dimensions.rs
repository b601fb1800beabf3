//! Physical print dimensions and their pixel projections.
//!
//! The canvas is the flattened printable wrap of the mug. All pixel sizes
//! derive from the physical constants below at a fixed resolution; they are
//! stable for the lifetime of a document. Changing the resolution or the
//! physical size means starting a new document.

/// Print resolution in dots per inch.
pub const DPI: f64 = 300.0;

/// Centimetres to inches.
pub const CM_TO_INCH: f64 = 0.393_701;

/// Printable wrap width in centimetres.
pub const PRINT_WIDTH_CM: f64 = 21.0;

/// Printable wrap height in centimetres.
pub const PRINT_HEIGHT_CM: f64 = 9.0;

/// Non-printable handle allowance in centimetres (visualization context only).
pub const HANDLE_WIDTH_CM: f64 = 4.0;

/// Convert a physical length to rounded device pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cm_to_px(cm: f64) -> u32 {
    (cm * CM_TO_INCH * DPI).round() as u32
}

/// Canvas width in pixels (2480 at 300 DPI).
#[must_use]
pub fn canvas_width_px() -> u32 {
    cm_to_px(PRINT_WIDTH_CM)
}

/// Canvas height in pixels (1063 at 300 DPI).
#[must_use]
pub fn canvas_height_px() -> u32 {
    cm_to_px(PRINT_HEIGHT_CM)
}

/// Handle allowance width in pixels (472 at 300 DPI).
#[must_use]
pub fn handle_width_px() -> u32 {
    cm_to_px(HANDLE_WIDTH_CM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_pixel_dimensions() {
        assert_eq!(canvas_width_px(), 2480);
        assert_eq!(canvas_height_px(), 1063);
    }

    #[test]
    fn test_handle_width() {
        assert_eq!(handle_width_px(), 472);
    }

    #[test]
    fn test_dimensions_are_stable() {
        // Derived constants must not drift between calls.
        assert_eq!(canvas_width_px(), canvas_width_px());
        assert_eq!(canvas_height_px(), canvas_height_px());
    }
}
