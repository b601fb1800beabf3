//! End-to-end tests driving a [`Document`] through the CPU rasterizer:
//! intent dispatch, preview refresh, snapshot restore, and the mirrored
//! export raster.

use std::io::Cursor;

use mug_core::render::{RasterOptions, SceneRasterizer};
use mug_core::{Document, Intent, IntentOutcome, LayerAction, NodePatch};
use mug_renderer::PixmapRasterizer;

fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode test png");
    bytes.into_inner()
}

fn new_document() -> Document {
    Document::new(Box::new(PixmapRasterizer::new()))
}

#[test]
fn test_design_session_end_to_end() {
    let mut document = new_document();
    assert!(document.preview().is_some());

    // Add a text node: it becomes active and the preview refreshes.
    let outcome = document
        .apply(Intent::AddText {
            content: "Nouveau texte".to_string(),
        })
        .expect("add text");
    assert_eq!(outcome, IntentOutcome::Mutated);
    assert_eq!(document.scene().len(), 1);
    let selection = document.selection().expect("selection");
    assert_eq!(selection.kind, "text");
    assert_eq!(selection.text.as_deref(), Some("Nouveau texte"));

    // Single-node layer move is a clamped mutation, order unchanged.
    let text_id = document.scene().nodes()[0].id;
    document
        .apply(Intent::Layer(LayerAction::Back))
        .expect("layer");
    assert_eq!(document.scene().nodes()[0].id, text_id);

    // An oversized upload lands downscaled to half the canvas width.
    let outcome = document
        .apply(Intent::AddImage {
            bytes: solid_png(4000, 4000, [40, 90, 160, 255]),
        })
        .expect("add image");
    assert_eq!(outcome, IntentOutcome::Mutated);
    let selection = document.selection().expect("selection");
    assert_eq!(selection.kind, "image");
    assert_eq!(selection.width, Some(4000));
    let effective_width = 4000.0 * selection.scale_x;
    assert!((effective_width - 1240.0).abs() < 0.5);

    // Reselect and delete the text node.
    document.set_active(Some(text_id));
    document.apply(Intent::DeleteActive).expect("delete");
    assert_eq!(document.scene().len(), 1);
    assert!(document.selection().is_none());

    // No text left, so the export is unmirrored at native resolution.
    let artifact = match document.apply(Intent::ExportRequest).expect("export") {
        IntentOutcome::Export(artifact) => artifact,
        other => panic!("expected export outcome, got {other:?}"),
    };
    assert!(artifact.filename.starts_with("lempreinte-mug-"));
    assert!(artifact.filename.ends_with(".png"));
    let decoded = image::load_from_memory(&artifact.png).expect("valid png");
    assert_eq!(decoded.width(), 2480);
    assert_eq!(decoded.height(), 1063);

    let rasterizer = PixmapRasterizer::new();
    let plain = rasterizer
        .rasterize(document.scene(), &RasterOptions::export(false))
        .expect("plain render");
    assert_eq!(artifact.png, plain);
}

#[test]
fn test_export_mirrors_when_text_present() {
    let mut document = new_document();
    document
        .apply(Intent::AddImage {
            bytes: solid_png(300, 200, [200, 40, 40, 255]),
        })
        .expect("add image");
    // Push the image off-center so the mirror is visible.
    document
        .apply(Intent::UpdateObject(NodePatch {
            x: Some(500.0),
            ..NodePatch::default()
        }))
        .expect("move");
    document
        .apply(Intent::AddText {
            content: "sublimation".to_string(),
        })
        .expect("add text");

    let artifact = document.export().expect("export");
    let rasterizer = PixmapRasterizer::new();
    let plain = rasterizer
        .rasterize(document.scene(), &RasterOptions::export(false))
        .expect("plain render");

    let mirrored = image::load_from_memory(&artifact.png)
        .expect("valid png")
        .to_rgba8();
    let plain = image::load_from_memory(&plain).expect("valid png").to_rgba8();
    assert_eq!(mirrored.dimensions(), plain.dimensions());

    let width = plain.width();
    let mut differs = false;
    for y in (0..plain.height()).step_by(7) {
        for x in (0..width).step_by(7) {
            assert_eq!(
                mirrored.get_pixel(x, y),
                plain.get_pixel(width - 1 - x, y),
                "mirror law broken at ({x}, {y})"
            );
            if mirrored.get_pixel(x, y) != plain.get_pixel(x, y) {
                differs = true;
            }
        }
    }
    assert!(differs, "mirrored export should not equal the plain render");
}

#[test]
fn test_snapshot_restores_design_in_fresh_document() {
    let mut document = new_document();
    document
        .apply(Intent::AddImage {
            bytes: solid_png(64, 64, [10, 180, 60, 255]),
        })
        .expect("add image");
    document
        .apply(Intent::AddText {
            content: "gravé".to_string(),
        })
        .expect("add text");
    let snapshot = document.snapshot().expect("snapshot").clone();

    // A fresh document picks the design back up without any re-upload; the
    // embedded asset travels inside the snapshot.
    let mut restored = new_document();
    restored
        .load_snapshot(Some(&snapshot))
        .expect("load snapshot");
    assert_eq!(restored.scene(), document.scene());
    assert!(restored.preview().is_some());

    let json = snapshot.to_json().expect("serialize");
    let reparsed = mug_core::DocumentSnapshot::from_json(&json).expect("parse");
    assert_eq!(reparsed, snapshot);
}

#[test]
fn test_preview_is_half_resolution() {
    let mut document = new_document();
    document
        .apply(Intent::AddText {
            content: "aperçu".to_string(),
        })
        .expect("add text");
    let preview = document.preview().expect("preview");
    let decoded = image::load_from_memory(preview).expect("valid png");
    assert_eq!(decoded.width(), 1240);
    assert_eq!(decoded.height(), 532);
}
