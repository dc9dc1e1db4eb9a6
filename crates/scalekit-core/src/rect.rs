//! Rect - Rectangle regions
//!
//! A rectangle in raster coordinates. Rasters, ROI masks and destination
//! regions are all positioned by a `Rect`, so a raster does not have to
//! start at (0, 0).

use crate::error::{Error, Result};

/// A rectangle region
///
/// A simple `Copy` type; `x`/`y` is the top-left corner, `w`/`h` the size.
/// The right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidDimension {
                width: w,
                height: h,
            });
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle at the origin
    pub const fn from_size(w: i32, h: i32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the rectangle is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the rectangle
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle contains another one
    ///
    /// An empty rectangle is contained anywhere.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        if other.is_empty() {
            return true;
        }
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if this rectangle overlaps with another
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Get the intersection of two rectangles
    ///
    /// Returns `None` if they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        Some(Rect::new_unchecked(x, y, r - x, b - y))
    }

    /// Grow the rectangle by the given amount on each side
    pub fn expand(&self, left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect::new_unchecked(
            self.x - left,
            self.y - top,
            self.w + left + right,
            self.h + top + bottom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Rect::new(0, 0, -1, 4).is_err());
        assert!(Rect::new(0, 0, 4, -1).is_err());
        assert!(Rect::new(-3, -3, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_edges_and_area() {
        let r = Rect::new(2, 3, 10, 5).unwrap();
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 8);
        assert_eq!(r.area(), 50);
        assert!(r.contains_point(2, 3));
        assert!(!r.contains_point(12, 3));
        assert!(!r.contains_point(2, 8));
    }

    #[test]
    fn test_containment() {
        let outer = Rect::new(0, 0, 10, 10).unwrap();
        assert!(outer.contains_rect(&Rect::new_unchecked(2, 2, 8, 8)));
        assert!(!outer.contains_rect(&Rect::new_unchecked(2, 2, 9, 8)));
        assert!(outer.contains_rect(&Rect::new_unchecked(50, 50, 0, 0)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new_unchecked(0, 0, 10, 10);
        let b = Rect::new_unchecked(5, -5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new_unchecked(5, 0, 5, 5)));

        let c = Rect::new_unchecked(10, 0, 3, 3);
        assert!(!a.intersects(&c));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_expand() {
        let r = Rect::new_unchecked(4, 4, 2, 2).expand(1, 1, 2, 2);
        assert_eq!(r, Rect::new_unchecked(3, 3, 5, 5));
    }
}
