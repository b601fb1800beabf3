//! Document controller: owns the scene, dispatches intents, and keeps the
//! derived snapshot and preview raster in sync.
//!
//! Synchronization contract: every intent that changes the node set or any
//! node field triggers exactly one snapshot recapture and exactly one
//! preview render (batched per intent, not per field), then notifies
//! subscribers. Selection changes notify without recapturing; a mutation
//! that also moves the selection (a new node becoming active, a delete
//! clearing it) follows its scene notification with a selection one.

use chrono::Utc;

use crate::asset::ImageAsset;
use crate::error::{CanvasError, CanvasResult};
use crate::intent::Intent;
use crate::node::NodeId;
use crate::render::{RasterOptions, SceneRasterizer};
use crate::scene::{SceneGraph, SelectionDescriptor};
use crate::snapshot::DocumentSnapshot;
use crate::viewport::DisplayViewport;

/// Filename prefix for exported rasters.
pub const EXPORT_FILE_PREFIX: &str = "lempreinte";

/// Handle returned by [`Document::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ticket guarding an asynchronous image decode against document teardown.
///
/// The decode of user-supplied bytes may complete after the document has
/// been disposed or reloaded; a stale ticket makes the completion a silent
/// drop instead of a mutation of a dead document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTicket {
    generation: u64,
}

/// Notifications delivered to document subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Node set or node fields changed; snapshot and preview were refreshed.
    SceneChanged,
    /// The active selection changed.
    SelectionChanged,
    /// A preview raster was produced on demand.
    PreviewUpdated,
}

/// Result of dispatching one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The scene mutated; snapshot and preview are fresh.
    Mutated,
    /// Nothing to do: no active node, or the document is disposed.
    Ignored,
    /// A preview raster was produced on demand.
    Preview,
    /// An export raster was produced.
    Export(ExportArtifact),
}

/// Finished export raster plus its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Timestamp-qualified suggested filename.
    pub filename: String,
    /// Encoded PNG at native canvas dimensions.
    pub png: Vec<u8>,
}

type Listener = Box<dyn Fn(&DocumentEvent)>;

/// The document controller.
pub struct Document {
    scene: SceneGraph,
    viewport: DisplayViewport,
    snapshot: Option<DocumentSnapshot>,
    preview: Option<Vec<u8>>,
    rasterizer: Box<dyn SceneRasterizer>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    generation: u64,
    disposed: bool,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.scene.len())
            .field("viewport", &self.viewport)
            .field("has_snapshot", &self.snapshot.is_some())
            .field("has_preview", &self.preview.is_some())
            .field("listeners", &self.listeners.len())
            .field("generation", &self.generation)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document.
    ///
    /// Performs the initial save so a snapshot and preview exist before the
    /// first mutation.
    #[must_use]
    pub fn new(rasterizer: Box<dyn SceneRasterizer>) -> Self {
        let mut document = Self {
            scene: SceneGraph::new(),
            viewport: DisplayViewport::default(),
            snapshot: None,
            preview: None,
            rasterizer,
            listeners: Vec::new(),
            next_subscription: 0,
            generation: 0,
            disposed: false,
        };
        document.commit_mutation();
        document
    }

    /// The current scene graph.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The latest snapshot, if one has been captured.
    #[must_use]
    pub fn snapshot(&self) -> Option<&DocumentSnapshot> {
        self.snapshot.as_ref()
    }

    /// The latest preview PNG, if the last render succeeded.
    #[must_use]
    pub fn preview(&self) -> Option<&[u8]> {
        self.preview.as_deref()
    }

    /// The current selection projection.
    #[must_use]
    pub fn selection(&self) -> Option<SelectionDescriptor> {
        self.scene.selection()
    }

    /// The display viewport.
    #[must_use]
    pub fn viewport(&self) -> DisplayViewport {
        self.viewport
    }

    /// Replace the display viewport. Display-only: no snapshot or preview
    /// is touched.
    pub fn set_viewport(&mut self, viewport: DisplayViewport) {
        self.viewport = viewport;
    }

    /// Whether the document has been torn down.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register a listener for document events.
    pub fn subscribe(&mut self, listener: impl Fn(&DocumentEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Dispatch one intent, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ImageDecode`] for unreadable image bytes and
    /// [`CanvasError::RenderFailure`] for a failed export. Operations that
    /// need an active node return [`IntentOutcome::Ignored`] instead of
    /// erroring.
    pub fn apply(&mut self, intent: Intent) -> CanvasResult<IntentOutcome> {
        if self.disposed {
            tracing::debug!("intent dropped: document disposed");
            return Ok(IntentOutcome::Ignored);
        }

        match intent {
            Intent::AddImage { bytes } => {
                let asset = ImageAsset::from_bytes(&bytes)?;
                let previous = self.scene.active_id();
                self.scene.add_image(asset);
                self.commit_mutation();
                self.notify_selection_if_changed(previous);
                Ok(IntentOutcome::Mutated)
            }
            Intent::AddText { content } => {
                let previous = self.scene.active_id();
                self.scene.add_text(&content);
                self.commit_mutation();
                self.notify_selection_if_changed(previous);
                Ok(IntentOutcome::Mutated)
            }
            Intent::DeleteActive => {
                let previous = self.scene.active_id();
                if self.scene.delete_active() {
                    self.commit_mutation();
                    self.notify_selection_if_changed(previous);
                    Ok(IntentOutcome::Mutated)
                } else {
                    Ok(IntentOutcome::Ignored)
                }
            }
            Intent::UpdateObject(patch) => {
                if self.scene.update_active(&patch) {
                    self.commit_mutation();
                    Ok(IntentOutcome::Mutated)
                } else {
                    Ok(IntentOutcome::Ignored)
                }
            }
            Intent::Layer(action) => {
                if self.scene.reorder_active(action) {
                    self.commit_mutation();
                    Ok(IntentOutcome::Mutated)
                } else {
                    Ok(IntentOutcome::Ignored)
                }
            }
            Intent::RequestPreview => {
                self.render_preview();
                self.notify(&DocumentEvent::PreviewUpdated);
                Ok(IntentOutcome::Preview)
            }
            Intent::ExportRequest => Ok(IntentOutcome::Export(self.export()?)),
        }
    }

    /// Set or clear the active node. Selection is not a scene mutation: it
    /// notifies without recapturing snapshot or preview.
    pub fn set_active(&mut self, id: Option<NodeId>) {
        if self.disposed {
            return;
        }
        if self.scene.set_active(id) {
            self.notify(&DocumentEvent::SelectionChanged);
        }
    }

    /// Produce the print-correct export raster.
    ///
    /// Mirrors horizontally about the canvas centerline iff any text node
    /// is present. Renders the fixed canvas frame at native resolution; the
    /// display viewport is saved before and restored after, on success and
    /// on error, so a failed export leaves the document unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::RenderFailure`] if rasterization cannot
    /// complete; no partial artifact is produced.
    pub fn export(&mut self) -> CanvasResult<ExportArtifact> {
        if self.disposed {
            return Err(CanvasError::RenderFailure(
                "document disposed".to_string(),
            ));
        }

        let mirror = self.scene.has_text();
        let saved_viewport = self.viewport;
        self.viewport = DisplayViewport::default();
        let result = self
            .rasterizer
            .rasterize(&self.scene, &RasterOptions::export(mirror));
        self.viewport = saved_viewport;

        let png = result?;
        let filename = format!(
            "{EXPORT_FILE_PREFIX}-mug-{}.png",
            Utc::now().timestamp_millis()
        );
        Ok(ExportArtifact { filename, png })
    }

    /// Restore the scene from a previously captured snapshot.
    ///
    /// Restoring `None` is a no-op and always succeeds. A successful
    /// restore invalidates outstanding image tickets and refreshes the
    /// derived snapshot and preview.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CorruptState`] on malformed input; the
    /// document is left untouched (empty at startup), never partially
    /// applied.
    pub fn load_snapshot(&mut self, snapshot: Option<&DocumentSnapshot>) -> CanvasResult<()> {
        if self.disposed {
            return Ok(());
        }
        let Some(snapshot) = snapshot else {
            return Ok(());
        };
        let scene = snapshot.restore()?;
        let previous = self.scene.active_id();
        self.scene = scene;
        self.generation += 1;
        self.commit_mutation();
        self.notify_selection_if_changed(previous);
        Ok(())
    }

    /// Obtain a ticket for an asynchronous image decode.
    #[must_use]
    pub fn image_ticket(&self) -> ImageTicket {
        ImageTicket {
            generation: self.generation,
        }
    }

    /// Completion half of an asynchronous image add.
    ///
    /// Returns `false` and applies nothing if the ticket is stale: the
    /// document was disposed or reloaded while the decode was in flight.
    pub fn complete_image_add(&mut self, ticket: ImageTicket, asset: ImageAsset) -> bool {
        if self.disposed || ticket.generation != self.generation {
            tracing::debug!("image add dropped: stale ticket");
            return false;
        }
        let previous = self.scene.active_id();
        self.scene.add_image(asset);
        self.commit_mutation();
        self.notify_selection_if_changed(previous);
        true
    }

    /// Tear the document down. Every later mutation, completion, or export
    /// becomes a no-op; the last snapshot stays readable.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.generation += 1;
    }

    fn notify_selection_if_changed(&self, previous: Option<NodeId>) {
        if self.scene.active_id() != previous {
            self.notify(&DocumentEvent::SelectionChanged);
        }
    }

    fn commit_mutation(&mut self) {
        self.snapshot = Some(DocumentSnapshot::capture(&self.scene));
        self.render_preview();
        self.notify(&DocumentEvent::SceneChanged);
    }

    fn render_preview(&mut self) {
        match self
            .rasterizer
            .rasterize(&self.scene, &RasterOptions::preview())
        {
            Ok(png) => self.preview = Some(png),
            Err(e) => {
                tracing::warn!("preview render failed: {e}");
                self.preview = None;
            }
        }
    }

    fn notify(&self, event: &DocumentEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}
