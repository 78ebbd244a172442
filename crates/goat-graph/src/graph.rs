//! Node graph construction and demand-driven evaluation.

use std::fmt;

use anyhow::{anyhow, bail, Result};
use tracing::{debug, trace};

use crate::buffer::Tile;
use crate::init::GraphContext;
use crate::operation::Operation;
use crate::rect::Rect;
use crate::value::Value;

/// Default processing chunk edge, in pixels.
pub const DEFAULT_CHUNK_SIZE: i32 = 128;

/// Handle to a node inside one [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Node {
    op: Box<dyn Operation>,
    input: Option<NodeId>,
}

/// What a call to [`Graph::process`] touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessStats {
    /// Chunks pulled through the sink.
    pub chunks: usize,
    pub pixels: usize,
}

/// A directed acyclic graph of operations with single-input pads.
///
/// Build it with [`create_node`](Graph::create_node) and
/// [`link`](Graph::link), then ask a sink to [`process`](Graph::process).
/// Evaluation is pull-based: the sink requests rectangles chunk by chunk and
/// each node requests only what it needs from upstream.
pub struct Graph {
    context: &'static GraphContext,
    nodes: Vec<Node>,
    chunk: (i32, i32),
}

impl Graph {
    pub(crate) fn new(context: &'static GraphContext) -> Self {
        Self {
            context,
            nodes: Vec::new(),
            chunk: (DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_SIZE),
        }
    }

    /// Instantiate a registered operation.
    pub fn create_node(&mut self, kind: &str) -> Result<NodeId> {
        let op = self.context.registry().create(kind)?;
        let id = NodeId(self.nodes.len());
        debug!(%id, kind, "created node");
        self.nodes.push(Node { op, input: None });
        Ok(id)
    }

    pub fn set_property(&mut self, node: NodeId, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        trace!(%node, key, ty = value.type_name(), "set property");
        self.node_mut(node)?.op.set_property(key, value)
    }

    /// Connect `from`'s output to `to`'s input, replacing any previous link
    /// into `to`.
    pub fn link(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let from_class = self.node(from)?.op.class();
        let to_class = self.node(to)?.op.class();

        if !from_class.has_output() {
            bail!("{} node {from} has no output pad", self.kind(from)?);
        }
        if !to_class.has_input() {
            bail!("{} node {to} has no input pad", self.kind(to)?);
        }
        if from == to || self.is_upstream(to, from) {
            bail!("linking {from} -> {to} would create a cycle");
        }

        debug!(%from, %to, "linked");
        self.node_mut(to)?.input = Some(from);
        Ok(())
    }

    /// Chain `nodes` pairwise: `a -> b -> c`.
    pub fn link_many(&mut self, nodes: &[NodeId]) -> Result<()> {
        for pair in nodes.windows(2) {
            self.link(pair[0], pair[1])?;
        }
        Ok(())
    }

    pub fn input_of(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(node)?.input)
    }

    pub fn kind(&self, node: NodeId) -> Result<&'static str> {
        Ok(self.node(node)?.op.kind())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Set the maximum chunk processed per pull.
    pub fn set_chunk_size(&mut self, width: i32, height: i32) {
        self.chunk = (width.max(1), height.max(1));
    }

    /// Region `node` can produce.
    pub fn bounding_box(&self, node: NodeId) -> Result<Rect> {
        let n = self.node(node)?;
        let input = match n.input {
            Some(upstream) => Some(self.bounding_box(upstream)?),
            None => None,
        };
        n.op.bounding_box(input)
    }

    /// Process everything the sink `node` can receive.
    pub fn process(&mut self, node: NodeId) -> Result<ProcessStats> {
        let bbox = self.bounding_box(node)?;
        self.process_rect(node, bbox)
    }

    /// Process the part of `roi` the sink `node` can receive. Only the
    /// requested rectangle is computed anywhere in the chain.
    pub fn process_rect(&mut self, node: NodeId, roi: Rect) -> Result<ProcessStats> {
        if self.node(node)?.op.class().has_output() {
            bail!("{} node {node} is not a sink", self.kind(node)?);
        }

        let bbox = self.bounding_box(node)?;
        let Some(area) = roi.intersect(&bbox) else {
            debug!(%node, %roi, %bbox, "nothing to process");
            return Ok(ProcessStats::default());
        };

        let mut stats = ProcessStats::default();
        for chunk in area.tiles(self.chunk.0, self.chunk.1) {
            self.pull(node, chunk)?;
            stats.chunks += 1;
            stats.pixels += chunk.area();
        }

        debug!(%node, %area, chunks = stats.chunks, "processed");
        Ok(stats)
    }

    fn pull(&mut self, id: NodeId, roi: Rect) -> Result<Option<Tile>> {
        let (has_input, upstream) = {
            let node = self.node(id)?;
            (node.op.class().has_input(), node.input)
        };

        let input = if has_input {
            let upstream = upstream.ok_or_else(|| {
                anyhow!(
                    "{} node {id} has nothing linked to its input",
                    self.nodes[id.0].op.kind()
                )
            })?;
            let needed = self.nodes[id.0].op.input_region(roi);
            let tile = self.pull(upstream, needed)?;
            if tile.is_none() {
                bail!("node {upstream} produced no output for {needed}");
            }
            tile
        } else {
            None
        };

        trace!(%id, %roi, "pull");
        self.nodes[id.0].op.process(input, roi)
    }

    /// True if `candidate` is reachable by walking inputs up from `node`.
    fn is_upstream(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut cursor = self.nodes.get(node.0).and_then(|n| n.input);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.nodes.get(id.0).and_then(|n| n.input);
        }
        false
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| anyhow!("node {id} does not belong to this graph"))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| anyhow!("node {id} does not belong to this graph"))
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.nodes.iter().map(|n| n.op.kind()).collect();
        f.debug_struct("Graph")
            .field("nodes", &kinds)
            .field("chunk", &self.chunk)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::format::PixelFormat;
    use crate::ops;

    fn chain(src: &PixelBuffer, dst: &PixelBuffer) -> (Graph, [NodeId; 3]) {
        let mut graph = crate::init().new_graph();
        let source = graph.create_node(ops::BUFFER_SOURCE).unwrap();
        graph.set_property(source, "buffer", src).unwrap();
        let invert = graph.create_node(ops::INVERT).unwrap();
        let sink = graph.create_node(ops::WRITE_BUFFER).unwrap();
        graph.set_property(sink, "buffer", dst).unwrap();
        graph.link_many(&[source, invert, sink]).unwrap();
        (graph, [source, invert, sink])
    }

    fn ramp(width: i32, height: i32) -> PixelBuffer {
        let data = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        PixelBuffer::from_pixels(width, height, PixelFormat::Y8, data).unwrap()
    }

    #[test]
    fn processes_full_extent() {
        let src = ramp(5, 4);
        let dst = src.duplicate();
        let (mut graph, [_, _, sink]) = chain(&src, &dst);

        let stats = graph.process(sink).unwrap();
        assert_eq!(stats.pixels, 20);
        dst.flush();

        let expected: Vec<u8> = src.pixels().iter().map(|v| 255 - v).collect();
        assert_eq!(dst.pixels(), expected);
    }

    #[test]
    fn processes_only_requested_rect() {
        let src = ramp(6, 6);
        let dst = src.duplicate();
        let (mut graph, [_, _, sink]) = chain(&src, &dst);
        graph.set_chunk_size(2, 2);

        let roi = Rect::new(1, 2, 3, 3);
        let stats = graph.process_rect(sink, roi).unwrap();
        assert_eq!(stats.chunks, 4);
        assert_eq!(stats.pixels, 9);
        dst.flush();

        let before = src.pixels();
        let after = dst.pixels();
        for y in 0..6 {
            for x in 0..6 {
                let i = (y * 6 + x) as usize;
                if roi.contains_point(x, y) {
                    assert_eq!(after[i], 255 - before[i], "inside at {x},{y}");
                } else {
                    assert_eq!(after[i], before[i], "outside at {x},{y}");
                }
            }
        }
    }

    #[test]
    fn sink_output_stays_pending_until_flush() {
        let src = ramp(3, 3);
        let dst = src.duplicate();
        let (mut graph, [_, _, sink]) = chain(&src, &dst);

        graph.process(sink).unwrap();
        assert!(dst.has_pending());
        assert_eq!(dst.pixels(), src.pixels());
    }

    #[test]
    fn roi_outside_extent_is_a_noop() {
        let src = ramp(3, 3);
        let dst = src.duplicate();
        let (mut graph, [_, _, sink]) = chain(&src, &dst);

        let stats = graph.process_rect(sink, Rect::new(10, 10, 4, 4)).unwrap();
        assert_eq!(stats, ProcessStats::default());
        assert!(!dst.has_pending());
    }

    #[test]
    fn link_rejects_cycles_and_bad_pads() {
        let src = ramp(2, 2);
        let (mut graph, [source, invert, sink]) = chain(&src, &src.duplicate());
        let second = graph.create_node(ops::INVERT).unwrap();

        assert!(graph.link(invert, invert).is_err());
        graph.link(invert, second).unwrap();
        assert!(graph.link(second, invert).is_err());
        assert!(graph.link(sink, second).is_err());
        assert!(graph.link(invert, source).is_err());
    }

    #[test]
    fn relinking_replaces_input() {
        let src = ramp(2, 2);
        let dst = src.duplicate();
        let (mut graph, [source, _, sink]) = chain(&src, &dst);

        // Bypass the invert node.
        graph.link(source, sink).unwrap();
        assert_eq!(graph.input_of(sink).unwrap(), Some(source));
        graph.process(sink).unwrap();
        dst.flush();
        assert_eq!(dst.pixels(), src.pixels());
    }

    #[test]
    fn unlinked_input_is_an_error() {
        let dst = ramp(2, 2);
        let mut graph = crate::init().new_graph();
        let sink = graph.create_node(ops::WRITE_BUFFER).unwrap();
        graph.set_property(sink, "buffer", &dst).unwrap();
        assert!(graph.process(sink).is_err());
    }

    #[test]
    fn only_sinks_process() {
        let src = ramp(2, 2);
        let (mut graph, [_, invert, _]) = chain(&src, &src.duplicate());
        assert!(graph.process(invert).is_err());
    }

    #[test]
    fn unknown_property_is_rejected() {
        let mut graph = crate::init().new_graph();
        let source = graph.create_node(ops::BUFFER_SOURCE).unwrap();
        assert!(graph.set_property(source, "path", "in.png").is_err());
        assert!(graph.set_property(source, "buffer", 3_i64).is_err());
    }

    #[test]
    fn format_mismatch_fails_at_the_sink() {
        let src = ramp(2, 2);
        let dst = PixelBuffer::new(2, 2, PixelFormat::Rgb8);
        let (mut graph, [_, _, sink]) = chain(&src, &dst);
        assert!(graph.process(sink).is_err());
    }
}
