//! Scene graph: ordered nodes, z-order, and the active selection.
//!
//! Node order is the single source of truth for stacking - index 0 paints
//! at the bottom, the last index on top. At most one node is active at a
//! time. Every operation that needs an active node degrades to a no-op
//! when nothing is selected.

use serde::{Deserialize, Serialize};

use crate::asset::ImageAsset;
use crate::dimensions;
use crate::node::{self, FontFamily, Node, NodeId, NodeKind, Placement};

/// Z-order moves for the active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerAction {
    /// Move to the absolute top.
    Front,
    /// Move to the absolute bottom.
    Back,
    /// Swap with the neighbor above, clamped at the top.
    Forward,
    /// Swap with the neighbor below, clamped at the bottom.
    Backward,
}

/// Partial update applied to the active node.
///
/// Absent fields are left untouched. Text-only fields are ignored when the
/// active node is an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePatch {
    /// New center X.
    pub x: Option<f32>,
    /// New center Y.
    pub y: Option<f32>,
    /// New horizontal scale; non-positive values are ignored.
    pub scale_x: Option<f32>,
    /// New vertical scale; non-positive values are ignored.
    pub scale_y: Option<f32>,
    /// New rotation in degrees (wrapped into `[0, 360)`).
    pub rotation: Option<f32>,
    /// New text content.
    pub text: Option<String>,
    /// New font family.
    pub font: Option<FontFamily>,
    /// New fill color as hex.
    pub fill: Option<String>,
    /// New font size in canvas pixels.
    pub font_size: Option<f32>,
}

/// Read-only projection of the active node for external UI.
///
/// Derived, never authoritative: edits made against it must come back as a
/// [`NodePatch`], they are never applied directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionDescriptor {
    /// Node identifier.
    pub id: String,
    /// Kind name (`image` or `text`).
    pub kind: &'static str,
    /// Text content, for text nodes.
    pub text: Option<String>,
    /// Font family, for text nodes.
    pub font: Option<FontFamily>,
    /// Fill color, for text nodes.
    pub fill: Option<String>,
    /// Font size, for text nodes.
    pub font_size: Option<f32>,
    /// Native width, for image nodes.
    pub width: Option<u32>,
    /// Native height, for image nodes.
    pub height: Option<u32>,
    /// Horizontal scale factor.
    pub scale_x: f32,
    /// Vertical scale factor.
    pub scale_y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

/// The ordered collection of placed nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    /// Nodes in paint order (index 0 = bottom).
    nodes: Vec<Node>,
    /// The single active node, if any.
    active: Option<NodeId>,
}

impl SceneGraph {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a scene from restored parts. The active id is trusted to
    /// refer to one of `nodes`; callers validate first.
    pub(crate) fn from_parts(nodes: Vec<Node>, active: Option<NodeId>) -> Self {
        Self { nodes, active }
    }

    /// Nodes in paint order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The active node's ID, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<NodeId> {
        self.active
    }

    /// The active node, if any.
    #[must_use]
    pub fn active_node(&self) -> Option<&Node> {
        let index = self.active_index()?;
        self.nodes.get(index)
    }

    fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Whether any text node is present. Drives the export mirror rule.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.nodes.iter().any(|n| n.kind.is_text())
    }

    /// Insert an image node centered on the canvas.
    ///
    /// If the raster's native width exceeds half the canvas width it is
    /// downscaled (aspect preserved) so its effective width equals half the
    /// canvas width. The new node goes on top of the z-order and becomes
    /// active.
    #[allow(clippy::cast_precision_loss)]
    pub fn add_image(&mut self, asset: ImageAsset) -> NodeId {
        let mut placement = Placement::centered();
        let half_canvas = dimensions::canvas_width_px() as f32 / 2.0;
        let native_width = asset.width as f32;
        if native_width > half_canvas {
            let factor = half_canvas / native_width;
            placement.scale_x = factor;
            placement.scale_y = factor;
        }

        let node = Node {
            id: NodeId::new(),
            kind: NodeKind::Image { asset },
            placement,
        };
        let id = node.id;
        self.nodes.push(node);
        self.active = Some(id);
        id
    }

    /// Insert a text node centered on the canvas with the default font,
    /// size, and black fill. Goes on top of the z-order and becomes active.
    pub fn add_text(&mut self, content: &str) -> NodeId {
        let node = Node::new(NodeKind::Text {
            content: content.to_string(),
            font: FontFamily::default(),
            fill: node::DEFAULT_FILL.to_string(),
            font_size: node::DEFAULT_FONT_SIZE,
        });
        let id = node.id;
        self.nodes.push(node);
        self.active = Some(id);
        id
    }

    /// Remove the active node and clear the selection.
    ///
    /// Returns `false` (no-op, not an error) when nothing is active.
    pub fn delete_active(&mut self) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        self.nodes.remove(index);
        self.active = None;
        true
    }

    /// Set or clear the active node.
    ///
    /// An ID not present in the scene is ignored. Returns whether the
    /// selection changed.
    pub fn set_active(&mut self, id: Option<NodeId>) -> bool {
        let next = match id {
            Some(id) if self.nodes.iter().any(|n| n.id == id) => Some(id),
            Some(_) => return false,
            None => None,
        };
        if next == self.active {
            return false;
        }
        self.active = next;
        true
    }

    /// Apply a partial update to the active node.
    ///
    /// Returns `false` (no-op) when nothing is active. Z-order is never
    /// affected. Non-positive scale factors are ignored so the positive
    /// scale invariant holds.
    pub fn update_active(&mut self, patch: &NodePatch) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let target = &mut self.nodes[index];

        if let Some(x) = patch.x {
            target.placement.x = x;
        }
        if let Some(y) = patch.y {
            target.placement.y = y;
        }
        if let Some(sx) = patch.scale_x {
            if sx > 0.0 {
                target.placement.scale_x = sx;
            }
        }
        if let Some(sy) = patch.scale_y {
            if sy > 0.0 {
                target.placement.scale_y = sy;
            }
        }
        if let Some(degrees) = patch.rotation {
            target.placement.set_rotation(degrees);
        }

        if let NodeKind::Text {
            content,
            font,
            fill,
            font_size,
        } = &mut target.kind
        {
            if let Some(text) = &patch.text {
                content.clone_from(text);
            }
            if let Some(family) = patch.font {
                *font = family;
            }
            if let Some(color) = &patch.fill {
                fill.clone_from(color);
            }
            if let Some(size) = patch.font_size {
                if size > 0.0 {
                    *font_size = size;
                }
            }
        }

        true
    }

    /// Move the active node within the z-order.
    ///
    /// `Forward`/`Backward` swap with the immediate neighbor and clamp at
    /// the boundaries; `Front`/`Back` move to the absolute ends. Returns
    /// `false` (no-op) when nothing is active.
    pub fn reorder_active(&mut self, action: LayerAction) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        match action {
            LayerAction::Front => {
                let moved = self.nodes.remove(index);
                self.nodes.push(moved);
            }
            LayerAction::Back => {
                let moved = self.nodes.remove(index);
                self.nodes.insert(0, moved);
            }
            LayerAction::Forward => {
                if index + 1 < self.nodes.len() {
                    self.nodes.swap(index, index + 1);
                }
            }
            LayerAction::Backward => {
                if index > 0 {
                    self.nodes.swap(index, index - 1);
                }
            }
        }
        true
    }

    /// Project the active node into a [`SelectionDescriptor`].
    #[must_use]
    pub fn selection(&self) -> Option<SelectionDescriptor> {
        let active = self.active_node()?;
        let placement = &active.placement;
        let mut descriptor = SelectionDescriptor {
            id: active.id.to_string(),
            kind: active.kind.name(),
            text: None,
            font: None,
            fill: None,
            font_size: None,
            width: None,
            height: None,
            scale_x: placement.scale_x,
            scale_y: placement.scale_y,
            rotation: placement.rotation(),
        };
        match &active.kind {
            NodeKind::Text {
                content,
                font,
                fill,
                font_size,
            } => {
                descriptor.text = Some(content.clone());
                descriptor.font = Some(*font);
                descriptor.fill = Some(fill.clone());
                descriptor.font_size = Some(*font_size);
            }
            NodeKind::Image { asset } => {
                descriptor.width = Some(asset.width);
                descriptor.height = Some(asset.height);
            }
        }
        Some(descriptor)
    }
}
