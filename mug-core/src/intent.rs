//! The intent channel consumed by the document controller.
//!
//! A tagged union replacing the ambient UI event bus of older designs: the
//! intent set is exhaustively enumerable, serializable, and processed
//! strictly in arrival order by a single dispatcher.

use serde::{Deserialize, Serialize};

use crate::scene::{LayerAction, NodePatch};

/// A discrete command dispatched by the surrounding UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Intent {
    /// Decode the supplied raster bytes and place the image.
    AddImage {
        /// Raw user-supplied image bytes (any sniffable format).
        bytes: Vec<u8>,
    },

    /// Place a text node with the given content.
    AddText {
        /// Initial text content.
        content: String,
    },

    /// Remove the active node, if any.
    DeleteActive,

    /// Apply a partial field update to the active node, if any.
    UpdateObject(NodePatch),

    /// Move the active node within the z-order, if any.
    #[serde(rename = "layer-action")]
    Layer(LayerAction),

    /// Re-render the preview raster on demand.
    RequestPreview,

    /// Produce the print-correct export raster.
    ExportRequest,
}
