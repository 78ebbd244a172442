//! Pull-based pixel processing graph.
//!
//! Graphs are small DAGs of [`Operation`]s wired source -> filter -> sink.
//! The subsystem is initialized once per process with [`init`]; every
//! [`Graph`] is created from the returned [`GraphContext`].
//!
//! ```rust,ignore
//! let ctx = goat_graph::init();
//! let mut graph = ctx.new_graph();
//! let source = graph.create_node(ops::BUFFER_SOURCE)?;
//! graph.set_property(source, "buffer", &input)?;
//! let invert = graph.create_node(ops::INVERT)?;
//! let sink = graph.create_node(ops::WRITE_BUFFER)?;
//! graph.set_property(sink, "buffer", &output)?;
//! graph.link_many(&[source, invert, sink])?;
//! graph.process_rect(sink, roi)?;
//! output.flush();
//! ```

pub mod buffer;
pub mod format;
pub mod graph;
pub mod init;
pub mod operation;
pub mod ops;
pub mod rect;
pub mod value;

pub use buffer::{PixelBuffer, Tile};
pub use format::PixelFormat;
pub use graph::{Graph, NodeId, ProcessStats};
pub use init::{init, is_initialized, GraphContext};
pub use operation::{Operation, OperationClass, OperationRegistry};
pub use rect::Rect;
pub use value::Value;
