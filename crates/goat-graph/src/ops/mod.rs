//! Stock operations.

mod buffer_source;
mod invert;
mod point;
mod write_buffer;

pub use buffer_source::BufferSource;
pub use invert::{invert, Invert};
pub use point::{PointFilter, PointOperation};
pub use write_buffer::WriteBuffer;

/// Reads pixels from a buffer. Property: `buffer`.
pub const BUFFER_SOURCE: &str = "goat:buffer-source";
/// Inverts color channels, leaving alpha untouched.
pub const INVERT: &str = "goat:invert";
/// Queues pixels into a buffer. Property: `buffer`.
pub const WRITE_BUFFER: &str = "goat:write-buffer";
