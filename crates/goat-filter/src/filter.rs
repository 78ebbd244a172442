//! The [`FilterPlugin`] trait and [`run_filter`], the run-callback body
//! shared by single-drawable filters.

use anyhow::Result;
use goat_core::{ProcedureConfig, RunContext, RunResult};
use goat_graph::{Graph, NodeId};
use tracing::{error, info};

use crate::dialog::{AboutDialog, DialogState};
use crate::executor::render_operation;
use crate::region::{empty_region_message, resolve_region};

/// A procedure that applies one graph operation to the selection of a
/// single drawable.
///
/// # Example
///
/// ```rust,ignore
/// struct Negate;
///
/// impl FilterPlugin for Negate {
///     fn operation(&self) -> &'static str {
///         goat_graph::ops::INVERT
///     }
///
///     fn dialog(&self, _procedure: &str) -> Option<AboutDialog> {
///         None
///     }
/// }
///
/// // inside `impl Plugin`:
/// fn run(&mut self, id: &str, ctx: RunContext<'_>) -> RunResult {
///     run_filter(&Negate, id, ctx)
/// }
/// ```
pub trait FilterPlugin {
    /// Registered graph operation applied to the region.
    fn operation(&self) -> &'static str;

    /// Dialog shown before processing in interactive mode. `None` runs
    /// straight through.
    fn dialog(&self, procedure: &str) -> Option<AboutDialog>;

    /// Set properties on the operation node from the run's config.
    fn configure(&self, _graph: &mut Graph, _node: NodeId, _config: &ProcedureConfig) -> Result<()> {
        Ok(())
    }
}

/// Message reported when the drawable count is not exactly one.
pub fn one_drawable_message(procedure: &str) -> String {
    format!("Procedure '{procedure}' only works with one drawable.")
}

/// Validate, optionally ask the user, process and report.
pub fn run_filter<F: FilterPlugin + ?Sized>(
    filter: &F,
    procedure: &str,
    ctx: RunContext<'_>,
) -> RunResult {
    let RunContext {
        run_mode,
        mut drawables,
        config,
        host,
        ..
    } = ctx;

    if drawables.len() != 1 {
        return RunResult::calling_error(one_drawable_message(procedure));
    }

    if run_mode.is_interactive() {
        if let Some(dialog) = filter.dialog(procedure) {
            match dialog.run(host) {
                Ok(DialogState::Proceed) => {}
                Ok(_) => {
                    info!(procedure, "cancelled from dialog");
                    return RunResult::cancel();
                }
                Err(err) => {
                    error!(procedure, "dialog failed: {err:#}");
                    return RunResult::fault(&err.context(format!("Procedure '{procedure}'")));
                }
            }
        }
    }

    let drawable = &mut *drawables[0];
    let Some(roi) = resolve_region(drawable).rect() else {
        return RunResult::calling_error(empty_region_message(procedure));
    };

    let report = render_operation(drawable, roi, filter.operation(), |graph, node| {
        filter.configure(graph, node, &config)
    });

    match report {
        Ok(report) => {
            host.displays_flush();
            info!(
                procedure,
                roi = %report.roi,
                chunks = report.stats.chunks,
                flushed_tiles = report.flushed_tiles,
                "applied {}",
                filter.operation()
            );
            RunResult::success()
        }
        Err(err) => {
            error!(procedure, "processing failed: {err:#}");
            RunResult::fault(&err.context(format!("Procedure '{procedure}'")))
        }
    }
}
