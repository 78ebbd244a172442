use anyhow::{anyhow, bail, Result};

use crate::buffer::{PixelBuffer, Tile};
use crate::operation::{Operation, OperationClass};
use crate::rect::Rect;
use crate::value::Value;

/// Sink node queueing its input into a [`PixelBuffer`].
///
/// Writes stay pending in the target buffer. The node never flushes; whoever
/// owns the buffer calls [`PixelBuffer::flush`] once processing is done.
#[derive(Debug, Default)]
pub struct WriteBuffer {
    buffer: Option<PixelBuffer>,
}

impl WriteBuffer {
    fn buffer(&self) -> Result<&PixelBuffer> {
        self.buffer
            .as_ref()
            .ok_or_else(|| anyhow!("{} has no 'buffer' set", super::WRITE_BUFFER))
    }
}

impl Operation for WriteBuffer {
    fn kind(&self) -> &'static str {
        super::WRITE_BUFFER
    }

    fn class(&self) -> OperationClass {
        OperationClass::Sink
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

    /// Whatever the input produces, clipped to the target buffer.
    fn bounding_box(&self, input: Option<Rect>) -> Result<Rect> {
        let input = input.ok_or_else(|| anyhow!("{} needs an input", self.kind()))?;
        Ok(self
            .buffer()?
            .extent()
            .intersect(&input)
            .unwrap_or_default())
    }

    fn process(&mut self, input: Option<Tile>, roi: Rect) -> Result<Option<Tile>> {
        let tile = input.ok_or_else(|| anyhow!("{} got no input for {roi}", self.kind()))?;
        self.buffer()?.write(tile)?;
        Ok(None)
    }
}
