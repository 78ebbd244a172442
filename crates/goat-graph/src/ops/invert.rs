use crate::format::PixelFormat;

use super::point::{PointFilter, PointOperation};

/// `v -> max - v` on color channels. Alpha is left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct Invert;

impl PointFilter for Invert {
    const KIND: &'static str = super::INVERT;

    fn filter_pixel(&self, format: PixelFormat, pixel: &mut [u8]) {
        for channel in &mut pixel[..format.color_channels()] {
            *channel = PixelFormat::CHANNEL_MAX - *channel;
        }
    }
}

pub fn invert() -> PointOperation<Invert> {
    PointOperation::new(Invert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Tile;
    use crate::operation::Operation;
    use crate::rect::Rect;

    #[test]
    fn inverts_rgb() {
        let mut px = [0, 128, 255];
        Invert.filter_pixel(PixelFormat::Rgb8, &mut px);
        assert_eq!(px, [255, 127, 0]);
    }

    #[test]
    fn keeps_alpha() {
        let mut px = [10, 20, 30, 40];
        Invert.filter_pixel(PixelFormat::Rgba8, &mut px);
        assert_eq!(px, [245, 235, 225, 40]);

        let mut gray = [200, 17];
        Invert.filter_pixel(PixelFormat::YA8, &mut gray);
        assert_eq!(gray, [55, 17]);
    }

    #[test]
    fn twice_is_identity() {
        let rect = Rect::from_size(16, 1);
        let data: Vec<u8> = (0..16).map(|i| i * 16 + 3).collect();
        let tile = Tile::new(rect, PixelFormat::Y8, data.clone()).unwrap();

        let mut op = invert();
        let once = op.process(Some(tile), rect).unwrap().unwrap();
        assert_ne!(once.data, data);
        let twice = op.process(Some(once), rect).unwrap().unwrap();
        assert_eq!(twice.data, data);
    }

    #[test]
    fn rejects_properties() {
        let mut op = invert();
        assert!(op.set_property("amount", 1.0.into()).is_err());
    }
}
