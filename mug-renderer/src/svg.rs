//! SVG intermediate representation of a scene.
//!
//! Nodes are emitted in paint order with their transforms applied about the
//! node center, matching the scene model's center-origin placement.

use std::fmt::Write;

use mug_core::dimensions;
use mug_core::node::{Node, NodeKind};
use mug_core::scene::SceneGraph;

/// Canvas background fill.
const BACKGROUND: &str = "#ffffff";

/// Build the SVG document for `scene`.
///
/// The output raster size is the canvas size times `scale`; the `viewBox`
/// stays in canvas coordinates so node placement is unaffected by the
/// multiplier.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn scene_to_svg(scene: &SceneGraph, scale: f32) -> String {
    let view_w = dimensions::canvas_width_px();
    let view_h = dimensions::canvas_height_px();
    let out_w = ((view_w as f32 * scale).round().max(1.0)) as u32;
    let out_h = ((view_h as f32 * scale).round().max(1.0)) as u32;

    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>",
    );

    for node in scene.nodes() {
        render_node_svg(&mut svg, node);
    }

    svg.push_str("</svg>");
    svg
}

/// Render a single node inside a center-origin transform group.
#[allow(clippy::cast_precision_loss)]
fn render_node_svg(svg: &mut String, node: &Node) {
    let placement = &node.placement;
    let _ = write!(
        svg,
        "<g transform=\"translate({} {}) rotate({}) scale({} {})\">",
        placement.x,
        placement.y,
        placement.rotation(),
        placement.scale_x,
        placement.scale_y,
    );

    match &node.kind {
        NodeKind::Image { asset } => {
            let half_w = asset.width as f32 / 2.0;
            let half_h = asset.height as f32 / 2.0;
            let escaped_src = escape_xml(asset.data_uri());
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{escaped_src}\"/>",
                -half_w, -half_h, asset.width, asset.height,
            );
        }

        NodeKind::Text {
            content,
            font,
            fill,
            font_size,
        } => {
            let escaped = escape_xml(content);
            let escaped_fill = escape_xml(fill);
            let _ = write!(
                svg,
                "<text x=\"0\" y=\"0\" font-size=\"{font_size}\" font-family=\"{}\" fill=\"{escaped_fill}\" text-anchor=\"middle\" dominant-baseline=\"central\">{escaped}</text>",
                font.css_name(),
            );
        }
    }

    svg.push_str("</g>");
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
