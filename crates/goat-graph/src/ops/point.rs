use anyhow::{anyhow, bail, Result};

use crate::buffer::Tile;
use crate::format::PixelFormat;
use crate::operation::{Operation, OperationClass};
use crate::rect::Rect;
use crate::value::Value;

/// A per-pixel transform with no neighbourhood.
pub trait PointFilter {
    const KIND: &'static str;

    /// Transform one pixel in place. `pixel` has `format.channels()` entries.
    fn filter_pixel(&self, format: PixelFormat, pixel: &mut [u8]);

    /// Apply a property. Filters without properties keep the default.
    fn set_property(&mut self, key: &str, _value: Value) -> Result<()> {
        bail!("{} has no property '{key}'", Self::KIND)
    }
}

/// Adapts a [`PointFilter`] to the [`Operation`] interface.
#[derive(Debug, Default)]
pub struct PointOperation<F> {
    filter: F,
}

impl<F: PointFilter> PointOperation<F> {
    pub fn new(filter: F) -> Self {
        Self { filter }
    }
}

impl<F: PointFilter> Operation for PointOperation<F> {
    fn kind(&self) -> &'static str {
        F::KIND
    }

    fn class(&self) -> OperationClass {
        OperationClass::Filter
    }

    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        self.filter.set_property(key, value)
    }

    fn bounding_box(&self, input: Option<Rect>) -> Result<Rect> {
        input.ok_or_else(|| anyhow!("{} needs an input", F::KIND))
    }

    fn process(&mut self, input: Option<Tile>, roi: Rect) -> Result<Option<Tile>> {
        let mut tile = input.ok_or_else(|| anyhow!("{} got no input for {roi}", F::KIND))?;
        let format = tile.format;
        for pixel in tile.pixels_mut() {
            self.filter.filter_pixel(format, pixel);
        }
        Ok(Some(tile))
    }
}
