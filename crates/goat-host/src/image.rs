use goat_core::{Drawable, ImageId};

use crate::drawable::MemoryDrawable;

/// An image: a stack of in-memory layers.
#[derive(Debug)]
pub struct MemoryImage {
    id: ImageId,
    layers: Vec<MemoryDrawable>,
}

impl MemoryImage {
    pub fn new(id: u32) -> Self {
        Self {
            id: ImageId(id),
            layers: Vec::new(),
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn with_layer(mut self, layer: MemoryDrawable) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layer(&self, index: usize) -> Option<&MemoryDrawable> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut MemoryDrawable> {
        self.layers.get_mut(index)
    }

    /// Every layer as a selected drawable, ready for a run context.
    pub fn drawables_mut(&mut self) -> Vec<&mut dyn Drawable> {
        self.layers
            .iter_mut()
            .map(|layer| layer as &mut dyn Drawable)
            .collect()
    }
}
