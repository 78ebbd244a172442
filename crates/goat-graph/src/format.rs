//! Pixel formats understood by the graph.

use std::fmt;

/// 8-bit-per-channel pixel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Grayscale.
    Y8,
    /// Grayscale with alpha.
    YA8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    /// Largest value a channel can hold.
    pub const CHANNEL_MAX: u8 = u8::MAX;

    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Y8 => 1,
            PixelFormat::YA8 => 2,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelFormat::YA8 | PixelFormat::Rgba8)
    }

    /// Channels carrying color, i.e. everything but alpha.
    pub fn color_channels(&self) -> usize {
        self.channels() - usize::from(self.has_alpha())
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.channels()
    }

    /// Babl-style name, e.g. `R'G'B'A u8`.
    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Y8 => "Y' u8",
            PixelFormat::YA8 => "Y'A u8",
            PixelFormat::Rgb8 => "R'G'B' u8",
            PixelFormat::Rgba8 => "R'G'B'A u8",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
