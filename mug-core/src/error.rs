//! Error types for the document core.

use thiserror::Error;

/// Result type for document operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in document operations.
///
/// "Nothing selected" is deliberately absent: operations that need an
/// active node degrade to a no-op instead of signalling failure. None of
/// these conditions is fatal to the host; all are recoverable at the
/// document level.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A snapshot could not be restored into a scene graph.
    #[error("Corrupt document state: {0}")]
    CorruptState(String),

    /// Rasterization could not complete.
    #[error("Render failure: {0}")]
    RenderFailure(String),

    /// User-supplied raster bytes could not be decoded.
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// Snapshot serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
