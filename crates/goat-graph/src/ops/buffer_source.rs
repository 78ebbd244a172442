use anyhow::{anyhow, bail, Result};

use crate::buffer::{PixelBuffer, Tile};
use crate::operation::{Operation, OperationClass};
use crate::rect::Rect;
use crate::value::Value;

/// Source node reading committed pixels from a [`PixelBuffer`].
#[derive(Debug, Default)]
pub struct BufferSource {
    buffer: Option<PixelBuffer>,
}

impl BufferSource {
    fn buffer(&self) -> Result<&PixelBuffer> {
        self.buffer
            .as_ref()
            .ok_or_else(|| anyhow!("{} has no 'buffer' set", super::BUFFER_SOURCE))
    }
}

impl Operation for BufferSource {
    fn kind(&self) -> &'static str {
        super::BUFFER_SOURCE
    }

    fn class(&self) -> OperationClass {
        OperationClass::Source
    }

    fn set_property(&mut self, key: &str, value: Value) -> Result<()> {
        match key {
            "buffer" => {
                self.buffer = Some(value.into_buffer(key)?);
                Ok(())
            }
            _ => bail!("{} has no property '{key}'", self.kind()),
        }
    }

    fn bounding_box(&self, _input: Option<Rect>) -> Result<Rect> {
        Ok(self.buffer()?.extent())
    }

    fn process(&mut self, _input: Option<Tile>, roi: Rect) -> Result<Option<Tile>> {
        self.buffer()?.read(roi).map(Some)
    }
}
