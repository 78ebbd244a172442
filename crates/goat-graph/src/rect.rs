//! Integer pixel rectangles.

use std::fmt;

/// An axis-aligned pixel rectangle. `x`/`y` is the top-left corner.
///
/// A rectangle with a non-positive width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Exclusive right edge, clamped to `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, clamped to `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered, zero for empty rectangles.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if `other` lies entirely inside `self`. Empty rectangles are
    /// contained everywhere.
    pub fn contains(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    /// Overlap of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let r = Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y));
        (!r.is_empty()).then_some(r)
    }

    /// Split into row-major chunks of at most `chunk_w` x `chunk_h` pixels.
    pub fn tiles(&self, chunk_w: i32, chunk_h: i32) -> Tiles {
        Tiles {
            area: *self,
            chunk_w: chunk_w.max(1),
            chunk_h: chunk_h.max(1),
            next_x: self.x,
            next_y: self.y,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Iterator returned by [`Rect::tiles`].
#[derive(Debug, Clone)]
pub struct Tiles {
    area: Rect,
    chunk_w: i32,
    chunk_h: i32,
    next_x: i32,
    next_y: i32,
}

impl Iterator for Tiles {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        if self.area.is_empty() || self.next_y >= self.area.bottom() {
            return None;
        }

        let w = self.chunk_w.min(self.area.right().saturating_sub(self.next_x));
        let h = self.chunk_h.min(self.area.bottom().saturating_sub(self.next_y));
        let tile = Rect::new(self.next_x, self.next_y, w, h);

        self.next_x = self.next_x.saturating_add(self.chunk_w);
        if self.next_x >= self.area.right() {
            self.next_x = self.area.x;
            self.next_y = self.next_y.saturating_add(self.chunk_h);
        }

        Some(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_overlapping() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 3, 10, 2);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 3, 5, 2)));
    }

    #[test]
    fn intersect_disjoint_and_touching() {
        let a = Rect::new(0, 0, 4, 4);
        assert_eq!(a.intersect(&Rect::new(10, 10, 2, 2)), None);
        // Shared edge only, no shared pixel.
        assert_eq!(a.intersect(&Rect::new(4, 0, 2, 2)), None);
    }

    #[test]
    fn empty_rects() {
        assert!(Rect::new(3, 3, 0, 5).is_empty());
        assert!(Rect::new(3, 3, 5, -1).is_empty());
        assert_eq!(Rect::new(0, 0, -2, 4).area(), 0);
        assert!(Rect::from_size(2, 2).contains(&Rect::new(50, 50, 0, 0)));
    }

    #[test]
    fn containment() {
        let outer = Rect::from_size(8, 8);
        assert!(outer.contains(&Rect::new(2, 2, 6, 6)));
        assert!(!outer.contains(&Rect::new(2, 2, 7, 6)));
        assert!(outer.contains_point(7, 7));
        assert!(!outer.contains_point(8, 0));
    }

    #[test]
    fn tiles_cover_area_exactly() {
        let area = Rect::new(1, 2, 5, 3);
        let tiles: Vec<Rect> = area.tiles(2, 2).collect();
        assert_eq!(
            tiles,
            vec![
                Rect::new(1, 2, 2, 2),
                Rect::new(3, 2, 2, 2),
                Rect::new(5, 2, 1, 2),
                Rect::new(1, 4, 2, 1),
                Rect::new(3, 4, 2, 1),
                Rect::new(5, 4, 1, 1),
            ]
        );
        let covered: usize = tiles.iter().map(Rect::area).sum();
        assert_eq!(covered, area.area());
    }

    #[test]
    fn tiles_of_empty_rect() {
        assert_eq!(Rect::new(0, 0, 0, 9).tiles(4, 4).count(), 0);
    }

    #[test]
    fn edges_near_i32_max_do_not_overflow() {
        let far = Rect::new(i32::MAX - 2, 0, 10, 10);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.intersect(&Rect::from_size(4, 4)), None);
        assert_eq!(Rect::new(i32::MIN, 0, 1, 1).intersect(&far), None);

        let edge = Rect::new(i32::MAX - 3, 0, 3, 1);
        assert_eq!(edge.tiles(2, 2).count(), 2);
    }

    #[test]
    fn display_format() {
        assert_eq!(Rect::new(1, 2, 3, 4).to_string(), "3x4+1+2");
    }
}
