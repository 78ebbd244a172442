//! Runs a single operation over a drawable's region of interest.
//!
//! Order of events, all on the calling thread:
//!
//! 1. make sure the graph subsystem is initialized
//! 2. build `buffer-source -> operation -> write-buffer` over the drawable's
//!    buffer and a fresh shadow buffer
//! 3. pull the ROI through the sink
//! 4. drop the graph and flush the shadow
//! 5. merge the flushed shadow into the drawable (with undo)
//! 6. mark the ROI as updated
//!
//! Refreshing displays is left to the caller so it happens once per run.

use anyhow::{Context, Result};
use goat_core::Drawable;
use goat_graph::{ops, Graph, NodeId, ProcessStats, Rect};
use tracing::debug;

/// What one execution did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionReport {
    pub roi: Rect,
    pub stats: ProcessStats,
    /// Tiles committed by the shadow flush.
    pub flushed_tiles: usize,
}

/// Apply `operation` to `roi` of `drawable`.
///
/// `configure` is called with the operation node before linking, to set its
/// properties.
pub fn render_operation<F>(
    drawable: &mut dyn Drawable,
    roi: Rect,
    operation: &str,
    configure: F,
) -> Result<ExecutionReport>
where
    F: FnOnce(&mut Graph, NodeId) -> Result<()>,
{
    let context = goat_graph::init();

    let input = drawable
        .buffer()
        .with_context(|| format!("acquiring buffer of {}", drawable.id()))?;
    let shadow = drawable
        .shadow_buffer()
        .with_context(|| format!("acquiring shadow buffer of {}", drawable.id()))?;

    let stats = {
        let mut graph = context.new_graph();
        let source = graph.create_node(ops::BUFFER_SOURCE)?;
        graph.set_property(source, "buffer", &input)?;
        let op = graph.create_node(operation)?;
        configure(&mut graph, op).with_context(|| format!("configuring {operation}"))?;
        let sink = graph.create_node(ops::WRITE_BUFFER)?;
        graph.set_property(sink, "buffer", shadow.target())?;
        graph.link_many(&[source, op, sink])?;

        debug!(?graph, %roi, "processing");
        graph
            .process_rect(sink, roi)
            .with_context(|| format!("processing {operation} over {roi}"))?
    };

    let flushed = shadow.flush();
    let flushed_tiles = flushed.committed_tiles();

    drawable
        .merge_shadow(flushed, roi, true)
        .with_context(|| format!("merging shadow into {}", drawable.id()))?;
    drawable.update(roi)?;

    Ok(ExecutionReport {
        roi,
        stats,
        flushed_tiles,
    })
}
