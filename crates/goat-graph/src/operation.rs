//! The [`Operation`] trait and the registry mapping node kinds to
//! constructors.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};

use crate::buffer::Tile;
use crate::ops;
use crate::rect::Rect;
use crate::value::Value;

/// Where an operation sits in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// No input pad, one output pad.
    Source,
    /// One input pad, one output pad.
    Filter,
    /// One input pad, no output pad.
    Sink,
}

impl OperationClass {
    pub fn has_input(&self) -> bool {
        !matches!(self, OperationClass::Source)
    }

    pub fn has_output(&self) -> bool {
        !matches!(self, OperationClass::Sink)
    }
}

/// A single node's behaviour.
///
/// The graph evaluates on demand: it asks a node for a rectangle, the node
/// says which input rectangle it needs via [`input_region`](Operation::input_region),
/// the graph pulls that from upstream and hands it to
/// [`process`](Operation::process).
pub trait Operation {
    /// Registered kind, e.g. `goat:invert`.
    fn kind(&self) -> &'static str;

    fn class(&self) -> OperationClass;

    /// Apply a configuration property. Unknown keys are an error.
    fn set_property(&mut self, key: &str, value: Value) -> Result<()>;

    /// Region this node can produce, given the region its input can produce.
    fn bounding_box(&self, input: Option<Rect>) -> Result<Rect>;

    /// Input region required to produce `roi`. Point operations need exactly
    /// `roi`.
    fn input_region(&self, roi: Rect) -> Rect {
        roi
    }

    /// Produce the output for `roi`. Sinks consume the input and return `None`.
    fn process(&mut self, input: Option<Tile>, roi: Rect) -> Result<Option<Tile>>;
}

pub type OperationFactory = fn() -> Box<dyn Operation>;

/// Maps node kinds to constructors.
#[derive(Default)]
pub struct OperationRegistry {
    factories: BTreeMap<&'static str, OperationFactory>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock operations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(ops::BUFFER_SOURCE, || -> Box<dyn Operation> {
            Box::new(ops::BufferSource::default())
        });
        registry.register(ops::INVERT, || -> Box<dyn Operation> { Box::new(ops::invert()) });
        registry.register(ops::WRITE_BUFFER, || -> Box<dyn Operation> {
            Box::new(ops::WriteBuffer::default())
        });
        registry
    }

    /// Register a constructor, replacing any previous one for `kind`.
    pub fn register(&mut self, kind: &'static str, factory: OperationFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn create(&self, kind: &str) -> Result<Box<dyn Operation>> {
        self.factories
            .get(kind)
            .map(|factory| factory())
            .ok_or_else(|| anyhow!("no operation registered as '{kind}'"))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}
