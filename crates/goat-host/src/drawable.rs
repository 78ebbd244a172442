use anyhow::{bail, Context, Result};
use goat_core::{Drawable, DrawableId, FlushedShadow, ShadowBuffer};
use goat_graph::{PixelBuffer, PixelFormat, Rect, Tile};
use tracing::debug;

/// Pixels a merge replaced, kept so it can be undone.
#[derive(Debug, Clone)]
pub struct UndoStep {
    pub rect: Rect,
    pub previous: Tile,
}

/// A layer held in memory, with a rectangular selection, an undo stack and
/// a log of the areas reported as updated.
#[derive(Debug)]
pub struct MemoryDrawable {
    id: DrawableId,
    name: String,
    buffer: PixelBuffer,
    selection: Option<Rect>,
    undo: Vec<UndoStep>,
    updates: Vec<Rect>,
    shadow_flushes_at_merge: Vec<u32>,
    refuse_shadow: bool,
}

impl MemoryDrawable {
    pub fn new(id: u32, name: &str, buffer: PixelBuffer) -> Self {
        Self {
            id: DrawableId(id),
            name: name.to_string(),
            buffer,
            selection: None,
            undo: Vec::new(),
            updates: Vec::new(),
            shadow_flushes_at_merge: Vec::new(),
            refuse_shadow: false,
        }
    }

    /// Layer built from tightly packed row-major pixels.
    pub fn from_pixels(
        id: u32,
        width: i32,
        height: i32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        let buffer = PixelBuffer::from_pixels(width, height, format, pixels)?;
        Ok(Self::new(id, &format!("Layer {id}"), buffer))
    }

    pub fn with_selection(mut self, selection: Rect) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Replace the selection. `None` selects nothing explicitly, which the
    /// host treats as "everything".
    pub fn select(&mut self, selection: Option<Rect>) {
        self.selection = selection;
    }

    /// Make the next shadow buffer requests fail.
    pub fn refuse_shadow_buffers(&mut self) {
        self.refuse_shadow = true;
    }

    /// Committed pixels.
    pub fn pixels(&self) -> Vec<u8> {
        self.buffer.pixels()
    }

    /// Areas passed to [`Drawable::update`], in order.
    pub fn updates(&self) -> &[Rect] {
        &self.updates
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// How many times each merged shadow had been flushed when it was merged.
    pub fn shadow_flushes_at_merge(&self) -> &[u32] {
        &self.shadow_flushes_at_merge
    }

    /// Restore the pixels replaced by the last merge. Returns `false` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(step) = self.undo.pop() else {
            return Ok(false);
        };
        self.buffer.write(step.previous)?;
        self.buffer.flush();
        self.updates.push(step.rect);
        debug!(drawable = %self.id, rect = %step.rect, "undone");
        Ok(true)
    }
}

impl Drawable for MemoryDrawable {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Rect {
        self.buffer.extent()
    }

    fn mask_intersect(&self) -> Option<Rect> {
        let bounds = self.bounds();
        match self.selection {
            Some(selection) => selection.intersect(&bounds),
            None => (!bounds.is_empty()).then_some(bounds),
        }
    }

    fn buffer(&self) -> Result<PixelBuffer> {
        Ok(self.buffer.clone())
    }

    fn shadow_buffer(&mut self) -> Result<ShadowBuffer> {
        if self.refuse_shadow {
            bail!("out of memory allocating shadow for {}", self.id);
        }
        Ok(ShadowBuffer::new(self.buffer.duplicate()))
    }

    fn merge_shadow(&mut self, shadow: FlushedShadow, roi: Rect, undo: bool) -> Result<()> {
        let roi = roi
            .intersect(&self.bounds())
            .with_context(|| format!("merge area {roi} misses {}", self.id))?;
        if undo {
            self.undo.push(UndoStep {
                rect: roi,
                previous: self.buffer.read(roi)?,
            });
        }
        self.shadow_flushes_at_merge.push(shadow.buffer().flush_count());
        self.buffer.copy_region_from(shadow.buffer(), roi)
    }

    fn update(&mut self, rect: Rect) -> Result<()> {
        self.updates.push(rect);
        Ok(())
    }
}
