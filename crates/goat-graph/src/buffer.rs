//! Pixel storage shared between the host and graph nodes.
//!
//! A [`PixelBuffer`] is a cheap, reference-counted handle. Clones refer to the
//! same storage, the way a host hands the same buffer to several nodes.
//!
//! Writes do not land in the buffer directly. They are queued as pending
//! tiles and only become visible to readers after [`PixelBuffer::flush`].
//! Anything that reads the committed contents before a flush sees the old
//! pixels.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::format::PixelFormat;
use crate::rect::Rect;

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// A rectangle of pixels travelling through the graph.
#[derive(Clone, PartialEq, Eq)]
pub struct Tile {
    pub rect: Rect,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl Tile {
    /// Build a tile, checking that `data` matches `rect` and `format`.
    pub fn new(rect: Rect, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = rect.area() * format.bytes_per_pixel();
        if data.len() != expected {
            bail!(
                "tile {rect} in {format} needs {expected} bytes, got {}",
                data.len()
            );
        }
        Ok(Self { rect, format, data })
    }

    /// Iterate pixels mutably, one channel slice per pixel.
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.format.bytes_per_pixel())
    }

    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.format.bytes_per_pixel())
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("rect", &self.rect)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// PixelBuffer
// ---------------------------------------------------------------------------

struct Storage {
    extent: Rect,
    format: PixelFormat,
    pixels: Vec<u8>,
    pending: Vec<Tile>,
    flushes: u32,
}

impl Storage {
    fn offset(&self, x: i32, y: i32) -> usize {
        let bpp = self.format.bytes_per_pixel();
        let col = (x - self.extent.x) as usize;
        let row = (y - self.extent.y) as usize;
        (row * self.extent.width as usize + col) * bpp
    }

    fn copy_out(&self, rect: Rect) -> Vec<u8> {
        if rect.is_empty() {
            return Vec::new();
        }
        let row_len = rect.width as usize * self.format.bytes_per_pixel();
        let mut out = Vec::with_capacity(rect.area() * self.format.bytes_per_pixel());
        for y in rect.y..rect.bottom() {
            let start = self.offset(rect.x, y);
            out.extend_from_slice(&self.pixels[start..start + row_len]);
        }
        out
    }

    fn copy_in(&mut self, rect: Rect, data: &[u8]) {
        if rect.is_empty() {
            return;
        }
        let row_len = rect.width as usize * self.format.bytes_per_pixel();
        for (i, y) in (rect.y..rect.bottom()).enumerate() {
            let start = self.offset(rect.x, y);
            self.pixels[start..start + row_len]
                .copy_from_slice(&data[i * row_len..(i + 1) * row_len]);
        }
    }
}

/// Reference-counted pixel storage with deferred writes.
#[derive(Clone)]
pub struct PixelBuffer {
    storage: Rc<RefCell<Storage>>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer anchored at the origin.
    pub fn new(width: i32, height: i32, format: PixelFormat) -> Self {
        let extent = Rect::from_size(width.max(0), height.max(0));
        let pixels = vec![0; extent.area() * format.bytes_per_pixel()];
        Self::wrap(extent, format, pixels)
    }

    /// Wrap existing pixel data (row-major, tightly packed).
    pub fn from_pixels(
        width: i32,
        height: i32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        let tile = Tile::new(Rect::from_size(width, height), format, pixels)?;
        Ok(Self::wrap(tile.rect, format, tile.data))
    }

    fn wrap(extent: Rect, format: PixelFormat, pixels: Vec<u8>) -> Self {
        Self {
            storage: Rc::new(RefCell::new(Storage {
                extent,
                format,
                pixels,
                pending: Vec::new(),
                flushes: 0,
            })),
        }
    }

    pub fn extent(&self) -> Rect {
        self.storage.borrow().extent
    }

    pub fn format(&self) -> PixelFormat {
        self.storage.borrow().format
    }

    /// Read committed pixels. `rect` must lie inside the extent.
    pub fn read(&self, rect: Rect) -> Result<Tile> {
        let storage = self.storage.borrow();
        if !storage.extent.contains(&rect) {
            bail!("read of {rect} outside buffer extent {}", storage.extent);
        }
        Ok(Tile {
            rect,
            format: storage.format,
            data: storage.copy_out(rect),
        })
    }

    /// Queue a tile for writing. Nothing is visible until [`flush`](Self::flush).
    /// Empty tiles are dropped.
    pub fn write(&self, tile: Tile) -> Result<()> {
        let mut storage = self.storage.borrow_mut();
        if tile.format != storage.format {
            bail!(
                "cannot write {} pixels into a {} buffer",
                tile.format,
                storage.format
            );
        }
        if !storage.extent.contains(&tile.rect) {
            bail!(
                "write of {} outside buffer extent {}",
                tile.rect,
                storage.extent
            );
        }
        if !tile.rect.is_empty() {
            storage.pending.push(tile);
        }
        Ok(())
    }

    /// Commit all pending writes in submission order. Returns the number of
    /// tiles committed.
    pub fn flush(&self) -> usize {
        let mut storage = self.storage.borrow_mut();
        let pending = std::mem::take(&mut storage.pending);
        for tile in &pending {
            storage.copy_in(tile.rect, &tile.data);
        }
        storage.flushes += 1;
        pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.storage.borrow().pending.is_empty()
    }

    /// How many times [`flush`](Self::flush) ran on this storage.
    pub fn flush_count(&self) -> u32 {
        self.storage.borrow().flushes
    }

    /// Snapshot of the whole committed contents.
    pub fn pixels(&self) -> Vec<u8> {
        self.storage.borrow().pixels.clone()
    }

    /// Deep copy of the committed contents into fresh storage.
    pub fn duplicate(&self) -> PixelBuffer {
        let storage = self.storage.borrow();
        Self::wrap(storage.extent, storage.format, storage.pixels.clone())
    }

    /// Copy committed pixels of `rect` from `src` straight into this buffer's
    /// committed storage, bypassing the pending queue.
    pub fn copy_region_from(&self, src: &PixelBuffer, rect: Rect) -> Result<()> {
        if self.ptr_eq(src) {
            return Ok(());
        }
        let tile = src.read(rect)?;
        let mut storage = self.storage.borrow_mut();
        if tile.format != storage.format {
            bail!("cannot copy {} pixels into a {} buffer", tile.format, storage.format);
        }
        if !storage.extent.contains(&rect) {
            bail!("copy of {rect} outside buffer extent {}", storage.extent);
        }
        storage.copy_in(rect, &tile.data);
        Ok(())
    }

    /// True if both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &PixelBuffer) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("PixelBuffer")
            .field("extent", &storage.extent)
            .field("format", &storage.format)
            .field("pending", &storage.pending.len())
            .finish()
    }
}
