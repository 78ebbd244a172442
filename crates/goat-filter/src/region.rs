//! Region of interest resolution.
//!
//! An empty region is a calling error: the filter refuses to run on a
//! selection that covers no pixel of the drawable, and reports it instead of
//! succeeding silently.

use goat_core::Drawable;
use goat_graph::Rect;
use tracing::debug;

/// What a run will touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// At least one pixel is selected.
    Selected(Rect),
    /// The selection misses the drawable entirely.
    Empty,
}

impl Region {
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Region::Selected(rect) => Some(*rect),
            Region::Empty => None,
        }
    }
}

/// Intersect the selection with the drawable's bounds.
pub fn resolve_region(drawable: &dyn Drawable) -> Region {
    let region = drawable
        .mask_intersect()
        .and_then(|rect| rect.intersect(&drawable.bounds()))
        .map_or(Region::Empty, Region::Selected);
    debug!(drawable = %drawable.id(), ?region, "resolved region");
    region
}

/// Message reported for [`Region::Empty`].
pub fn empty_region_message(procedure: &str) -> String {
    format!("Procedure '{procedure}': no pixels to process in the selected area.")
}
