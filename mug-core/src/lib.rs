//! # Mug Print Studio Core
//!
//! Document model for composing a 2D design on the flattened print area of
//! a mug, and deriving the two artifacts the surrounding UI consumes: a
//! half-resolution preview raster and a print-correct full-resolution export.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  mug-core                   │
//! ├─────────────────────┬───────────────────────┤
//! │  Scene Graph        │  Document Controller  │
//! │  - Nodes (z-order)  │  - Intent dispatch    │
//! │  - Active selection │  - Snapshot + preview │
//! │  - Partial updates  │  - Export pipeline    │
//! ├─────────────────────┼───────────────────────┤
//! │  Snapshots          │  Dimensions/Viewport  │
//! │  - JSON round-trip  │  - cm × DPI → px      │
//! │  - Embedded assets  │  - Container fit      │
//! └─────────────────────┴───────────────────────┘
//! ```
//!
//! Rasterization is behind the [`SceneRasterizer`] seam; a CPU
//! implementation lives in the companion `mug-renderer` crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod dimensions;
pub mod document;
pub mod error;
pub mod intent;
pub mod node;
pub mod render;
pub mod scene;
pub mod snapshot;
pub mod viewport;

pub use asset::ImageAsset;
pub use document::{
    Document, DocumentEvent, ExportArtifact, ImageTicket, IntentOutcome, SubscriptionId,
};
pub use error::{CanvasError, CanvasResult};
pub use intent::Intent;
pub use node::{FontFamily, Node, NodeId, NodeKind, Placement};
pub use render::{RasterOptions, SceneRasterizer};
pub use scene::{LayerAction, NodePatch, SceneGraph, SelectionDescriptor};
pub use snapshot::DocumentSnapshot;
pub use viewport::{compute_fit_scale, DisplayViewport};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
