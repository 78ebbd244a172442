//! Process-wide graph subsystem state.
//!
//! [`init`] is idempotent and cheap after the first call. There is no
//! teardown; the context lives until the process exits.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::graph::Graph;
use crate::operation::OperationRegistry;

static CONTEXT: OnceCell<GraphContext> = OnceCell::new();

/// Initialized subsystem. Graphs can only be created from here, so holding a
/// `&GraphContext` proves [`init`] ran.
pub struct GraphContext {
    registry: OperationRegistry,
}

impl GraphContext {
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Start an empty graph.
    pub fn new_graph(&'static self) -> Graph {
        Graph::new(self)
    }
}

/// Initialize the subsystem on first call; later calls return the same
/// context.
pub fn init() -> &'static GraphContext {
    CONTEXT.get_or_init(|| {
        let registry = OperationRegistry::with_builtins();
        debug!(
            operations = ?registry.kinds().collect::<Vec<_>>(),
            "graph subsystem initialized"
        );
        GraphContext { registry }
    })
}

pub fn is_initialized() -> bool {
    CONTEXT.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let first = init();
        let second = init();
        assert!(std::ptr::eq(first, second));
        assert!(is_initialized());
    }

    #[test]
    fn init_from_many_threads_yields_one_context() {
        let addrs: Vec<usize> = (0..4)
            .map(|_| std::thread::spawn(|| init() as *const GraphContext as usize))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
