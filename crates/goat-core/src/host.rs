//! Interfaces the host provides to a running procedure.
//!
//! Images, drawables, displays and dialogs belong to the host. Plug-ins
//! only see them through these traits.

use std::fmt;

use anyhow::Result;
use goat_graph::{PixelBuffer, Rect};

use crate::protocol::DialogResponse;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u32);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image #{}", self.0)
    }
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drawable #{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Shadow buffers
// ---------------------------------------------------------------------------

/// Scratch output buffer for a drawable.
///
/// Processing writes into [`target`](ShadowBuffer::target). The drawable
/// only accepts the result back as a [`FlushedShadow`], which can only be
/// obtained through [`flush`](ShadowBuffer::flush), so pending writes can
/// never be skipped by the merge.
#[derive(Debug)]
pub struct ShadowBuffer {
    buffer: PixelBuffer,
}

impl ShadowBuffer {
    /// Wrap the host's scratch storage.
    pub fn new(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Buffer to hand to a sink node.
    pub fn target(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Commit pending writes and release the shadow for merging.
    pub fn flush(self) -> FlushedShadow {
        let tiles = self.buffer.flush();
        tracing::trace!(tiles, "shadow flushed");
        FlushedShadow {
            buffer: self.buffer,
            tiles,
        }
    }
}

/// A shadow buffer whose writes are all committed.
#[derive(Debug)]
pub struct FlushedShadow {
    buffer: PixelBuffer,
    tiles: usize,
}

impl FlushedShadow {
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Tiles the flush committed.
    pub fn committed_tiles(&self) -> usize {
        self.tiles
    }
}

// ---------------------------------------------------------------------------
// Drawable
// ---------------------------------------------------------------------------

/// An editable pixel surface (layer, channel or mask).
pub trait Drawable {
    fn id(&self) -> DrawableId;

    fn name(&self) -> &str;

    /// Pixel extent of the drawable.
    fn bounds(&self) -> Rect;

    /// Intersection of the active selection with the drawable's bounds, or
    /// `None` if no pixel is selected. With no selection at all the whole
    /// drawable counts as selected.
    fn mask_intersect(&self) -> Option<Rect>;

    /// The drawable's pixels.
    fn buffer(&self) -> Result<PixelBuffer>;

    /// A scratch buffer initialised with the drawable's current pixels.
    fn shadow_buffer(&mut self) -> Result<ShadowBuffer>;

    /// Copy `roi` from the shadow into the drawable. With `undo`, the previous
    /// contents of `roi` are pushed to the undo stack first.
    fn merge_shadow(&mut self, shadow: FlushedShadow, roi: Rect, undo: bool) -> Result<()>;

    /// Tell the host `rect` changed so views can redraw it.
    fn update(&mut self, rect: Rect) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

/// A button added to a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton {
    /// Label with an optional `_` mnemonic.
    pub label: String,
    pub response: DialogResponse,
}

/// Contents of a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec {
    pub title: String,
    /// Window role, used by the host to remember placement.
    pub role: String,
    pub help_id: String,
    /// Text shown in the dialog body.
    pub message: String,
    pub buttons: Vec<DialogButton>,
    pub default_response: Option<DialogResponse>,
}

impl DialogSpec {
    pub fn add_button(&mut self, label: &str, response: DialogResponse) -> &mut Self {
        self.buttons.push(DialogButton {
            label: label.to_string(),
            response,
        });
        self
    }
}

/// Opaque handle to an open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogHandle(pub u32);

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Services the host offers during a run.
pub trait Host {
    /// Redraw every display whose drawables were updated.
    fn displays_flush(&mut self);

    /// Create and show a modal dialog.
    fn open_dialog(&mut self, spec: &DialogSpec) -> Result<DialogHandle>;

    /// Block until the user picks a response. The dialog stays open.
    fn run_dialog(&mut self, dialog: DialogHandle) -> Result<DialogResponse>;

    fn close_dialog(&mut self, dialog: DialogHandle);

    /// Open `uri` in an external viewer.
    fn show_uri(&mut self, uri: &str) -> Result<()>;
}
