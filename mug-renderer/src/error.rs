//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rasterization.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The scene's SVG projection could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// An embedded raster asset could not be read.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Pixel buffer allocation or rasterization failed.
    #[error("Frame render failed: {0}")]
    Frame(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<RenderError> for mug_core::CanvasError {
    fn from(e: RenderError) -> Self {
        Self::RenderFailure(e.to_string())
    }
}
