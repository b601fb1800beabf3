//! Scene nodes - the placed design elements.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::ImageAsset;
use crate::dimensions;

/// Default font size for newly added text nodes, in canvas pixels.
pub const DEFAULT_FONT_SIZE: f32 = 100.0;

/// Default fill for newly added text nodes.
pub const DEFAULT_FILL: &str = "#000000";

/// Unique identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Create a new unique node ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a node ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of font families available to text nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    /// Arial (default).
    #[default]
    Arial,
    /// Helvetica.
    Helvetica,
    /// Times New Roman.
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    /// Courier New.
    #[serde(rename = "Courier New")]
    CourierNew,
    /// Georgia.
    Georgia,
    /// Verdana.
    Verdana,
    /// Impact.
    Impact,
    /// Trebuchet MS.
    #[serde(rename = "Trebuchet MS")]
    TrebuchetMs,
}

impl FontFamily {
    /// CSS font-family name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Arial => "Arial",
            Self::Helvetica => "Helvetica",
            Self::TimesNewRoman => "Times New Roman",
            Self::CourierNew => "Courier New",
            Self::Georgia => "Georgia",
            Self::Verdana => "Verdana",
            Self::Impact => "Impact",
            Self::TrebuchetMs => "Trebuchet MS",
        }
    }
}

/// The content a node carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeKind {
    /// A placed raster image.
    Image {
        /// Self-contained embedded raster.
        asset: ImageAsset,
    },

    /// A text element.
    Text {
        /// Text content.
        content: String,
        /// Font family from the closed set.
        font: FontFamily,
        /// Fill color as hex (e.g. `#000000`).
        fill: String,
        /// Font size in canvas pixels.
        font_size: f32,
    },
}

impl NodeKind {
    /// Whether this is a text node. Drives the export mirror rule.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Kind name as exposed to external UI (`image` or `text`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Text { .. } => "text",
        }
    }
}

/// Center-origin placement of a node on the canvas.
///
/// Position is the node's center point in canvas pixel space. Scale factors
/// are independent per axis and must stay positive; rotation is stored in
/// degrees wrapped to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Center X in canvas pixels.
    pub x: f32,
    /// Center Y in canvas pixels.
    pub y: f32,
    /// Horizontal scale factor.
    pub scale_x: f32,
    /// Vertical scale factor.
    pub scale_y: f32,
    /// Rotation in degrees, `[0, 360)`. Kept private so it always wraps.
    rotation: f32,
}

impl Placement {
    /// Placement at the canvas center with identity scale and no rotation.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centered() -> Self {
        Self {
            x: dimensions::canvas_width_px() as f32 / 2.0,
            y: dimensions::canvas_height_px() as f32 / 2.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }

    /// Rotation in degrees, `[0, 360)`.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set the rotation, wrapping into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::centered()
    }
}

/// A placed element: content plus placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Node content.
    pub kind: NodeKind,
    /// Position, scale, and rotation.
    pub placement: Placement,
}

impl Node {
    /// Create a new node centered on the canvas.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            placement: Placement::centered(),
        }
    }
}
