//! Serializable document snapshots.
//!
//! A snapshot is a pure projection of the scene graph, replaced wholesale on
//! every mutation and held by the surrounding application to restore the
//! graph after a reload. Image nodes carry their raster embedded, so a
//! snapshot restores without any external asset.

use serde::{Deserialize, Serialize};

use crate::dimensions;
use crate::error::{CanvasError, CanvasResult};
use crate::node::{Node, NodeId, NodeKind, Placement};
use crate::scene::SceneGraph;

/// Current snapshot schema version. A snapshot produced by a structurally
/// different schema is rejected as corrupt rather than partially applied.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier.
    pub id: String,
    /// Node content.
    pub kind: NodeKind,
    /// Position, scale, and rotation.
    pub placement: Placement,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.to_string(),
            kind: node.kind.clone(),
            placement: node.placement,
        }
    }
}

/// Serializable projection of a scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Schema version tag.
    pub version: u32,
    /// Canvas pixel width the snapshot was captured against.
    pub width: u32,
    /// Canvas pixel height the snapshot was captured against.
    pub height: u32,
    /// Node records bottom to top (paint order).
    pub nodes: Vec<NodeRecord>,
    /// Active node id, if one was selected.
    pub active: Option<String>,
}

impl DocumentSnapshot {
    /// Capture the current scene. Pure: repeated calls against an unchanged
    /// graph produce value-equal snapshots.
    #[must_use]
    pub fn capture(scene: &SceneGraph) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            width: dimensions::canvas_width_px(),
            height: dimensions::canvas_height_px(),
            nodes: scene.nodes().iter().map(NodeRecord::from).collect(),
            active: scene.active_id().map(|id| id.to_string()),
        }
    }

    /// Rebuild a scene graph equivalent to the one captured.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CorruptState`] on a version mismatch, canvas
    /// dimension mismatch, unparseable node id, non-positive scale factor,
    /// or an active id that refers to no node. Never yields a partial
    /// graph: any failure leaves nothing constructed.
    pub fn restore(&self) -> CanvasResult<SceneGraph> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CanvasError::CorruptState(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        if self.width != dimensions::canvas_width_px()
            || self.height != dimensions::canvas_height_px()
        {
            return Err(CanvasError::CorruptState(format!(
                "snapshot canvas {}x{} does not match document canvas {}x{}",
                self.width,
                self.height,
                dimensions::canvas_width_px(),
                dimensions::canvas_height_px()
            )));
        }

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for record in &self.nodes {
            let id = NodeId::parse(&record.id)
                .map_err(|e| CanvasError::CorruptState(format!("bad node id: {e}")))?;
            if record.placement.scale_x <= 0.0 || record.placement.scale_y <= 0.0 {
                return Err(CanvasError::CorruptState(format!(
                    "non-positive scale factor on node {id}"
                )));
            }
            let mut placement = record.placement;
            placement.set_rotation(placement.rotation());
            nodes.push(Node {
                id,
                kind: record.kind.clone(),
                placement,
            });
        }

        let active = match &self.active {
            Some(raw) => {
                let id = NodeId::parse(raw)
                    .map_err(|e| CanvasError::CorruptState(format!("bad active id: {e}")))?;
                if !nodes.iter().any(|n| n.id == id) {
                    return Err(CanvasError::CorruptState(format!(
                        "active id {id} refers to no node"
                    )));
                }
                Some(id)
            }
            None => None,
        };

        Ok(SceneGraph::from_parts(nodes, active))
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CorruptState`] on malformed or foreign input.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        serde_json::from_str(json).map_err(|e| CanvasError::CorruptState(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ImageAsset;
    use crate::scene::NodePatch;

    fn stub_asset(width: u32, height: u32) -> ImageAsset {
        ImageAsset {
            width,
            height,
            data: "data:image/png;base64,".to_string(),
        }
    }

    fn populated_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        scene.add_text("bonjour");
        scene.add_image(stub_asset(300, 200));
        scene.update_active(&NodePatch {
            x: Some(42.0),
            rotation: Some(15.0),
            ..NodePatch::default()
        });
        scene
    }

    #[test]
    fn test_round_trip_is_value_equal() {
        let scene = populated_scene();
        let snapshot = DocumentSnapshot::capture(&scene);
        let restored = snapshot.restore().expect("restore");
        assert_eq!(scene, restored);
        // And the projection is stable across the trip.
        assert_eq!(snapshot, DocumentSnapshot::capture(&restored));
    }

    #[test]
    fn test_capture_is_pure() {
        let scene = populated_scene();
        assert_eq!(
            DocumentSnapshot::capture(&scene),
            DocumentSnapshot::capture(&scene)
        );
    }

    #[test]
    fn test_json_round_trip() {
        let scene = populated_scene();
        let snapshot = DocumentSnapshot::capture(&scene);
        let json = snapshot.to_json().expect("serialize");
        let back = DocumentSnapshot::from_json(&json).expect("parse");
        assert_eq!(snapshot, back);
        assert_eq!(back.restore().expect("restore"), scene);
    }

    #[test]
    fn test_malformed_json_is_corrupt_state() {
        let result = DocumentSnapshot::from_json("{\"not\": \"a snapshot\"}");
        assert!(matches!(result, Err(CanvasError::CorruptState(_))));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut snapshot = DocumentSnapshot::capture(&SceneGraph::new());
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            snapshot.restore(),
            Err(CanvasError::CorruptState(_))
        ));
    }

    #[test]
    fn test_foreign_canvas_dimensions_rejected() {
        let mut snapshot = DocumentSnapshot::capture(&SceneGraph::new());
        snapshot.width = 800;
        snapshot.height = 600;
        assert!(matches!(
            snapshot.restore(),
            Err(CanvasError::CorruptState(_))
        ));
    }

    #[test]
    fn test_bad_node_id_rejected() {
        let mut scene = SceneGraph::new();
        scene.add_text("x");
        let mut snapshot = DocumentSnapshot::capture(&scene);
        snapshot.nodes[0].id = "not-a-uuid".to_string();
        snapshot.active = None;
        assert!(matches!(
            snapshot.restore(),
            Err(CanvasError::CorruptState(_))
        ));
    }

    #[test]
    fn test_dangling_active_id_rejected() {
        let mut scene = SceneGraph::new();
        scene.add_text("x");
        let mut snapshot = DocumentSnapshot::capture(&scene);
        snapshot.active = Some(NodeId::new().to_string());
        assert!(matches!(
            snapshot.restore(),
            Err(CanvasError::CorruptState(_))
        ));
    }

    #[test]
    fn test_non_positive_scale_rejected() {
        let mut scene = SceneGraph::new();
        scene.add_text("x");
        let mut snapshot = DocumentSnapshot::capture(&scene);
        snapshot.nodes[0].placement.scale_x = -1.0;
        assert!(matches!(
            snapshot.restore(),
            Err(CanvasError::CorruptState(_))
        ));
    }

    #[test]
    fn test_empty_scene_round_trip() {
        let scene = SceneGraph::new();
        let snapshot = DocumentSnapshot::capture(&scene);
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.active.is_none());
        assert_eq!(snapshot.restore().expect("restore"), scene);
    }
}
