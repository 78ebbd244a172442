/// Counts display refreshes.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    flushes: u32,
}

impl MemoryDisplay {
    pub fn flush(&mut self) {
        self.flushes += 1;
        tracing::trace!(flushes = self.flushes, "displays flushed");
    }

    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}
