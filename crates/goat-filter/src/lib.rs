//! High-level framework for filters that apply one graph operation to the
//! selected region of a single drawable.
//!
//! # Overview
//!
//! - [`FilterPlugin`] is the trait filter authors implement.
//! - [`run_filter`] is the run-callback body: it checks the drawable count,
//!   shows the optional [`AboutDialog`] in interactive mode, resolves the
//!   [`Region`], runs the graph through [`render_operation`] and reports a
//!   [`RunResult`](goat_core::RunResult).

pub mod dialog;
pub mod executor;
pub mod filter;
pub mod region;

pub use dialog::{AboutDialog, DialogState};
pub use executor::{render_operation, ExecutionReport};
pub use filter::{one_drawable_message, run_filter, FilterPlugin};
pub use region::{empty_region_message, resolve_region, Region};
