//! Box - Rectangle regions
//!
//! Image bounds, quadrant splits and crop regions are all expressed as
//! a `Box`. The origin is not required to be (0, 0): morphological
//! operations shift bounds in and out, and later stages keep the
//! coordinates of the stage that produced them.

use crate::error::{Error, Result};

/// A rectangle region
///
/// This is a simple Copy type since it's small and frequently copied.
/// `right()` and `bottom()` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidDimension {
                width: w,
                height: h,
            });
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box anchored at the origin
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
        self.w.max(0) as i64 * self.h.max(0) as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Grow the box outward by a separate margin on each side
    pub fn expand(&self, left: i32, top: i32, right: i32, bottom: i32) -> Box {
        Box {
            x: self.x - left,
            y: self.y - top,
            w: self.w + left + right,
            h: self.h + top + bottom,
        }
    }

    /// Shrink the box inward by a separate margin on each side
    ///
    /// The size saturates at zero, so shrinking a box smaller than its
    /// margins yields an empty box rather than a negative one.
    pub fn shrink(&self, left: i32, top: i32, right: i32, bottom: i32) -> Box {
        Box {
            x: self.x + left,
            y: self.y + top,
            w: (self.w - left - right).max(0),
            h: (self.h - top - bottom).max(0),
        }
    }

    /// Split the box into four quadrants at the midpoints of its width
    /// and height.
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right. Odd sizes
    /// put the extra column/row in the right/bottom quadrants. The
    /// quadrants are disjoint and together cover the box exactly.
    pub fn quadrants(&self) -> [Box; 4] {
        let hw = self.w / 2;
        let hh = self.h / 2;
        [
            Box::new_unchecked(self.x, self.y, hw, hh),
            Box::new_unchecked(self.x + hw, self.y, self.w - hw, hh),
            Box::new_unchecked(self.x, self.y + hh, hw, self.h - hh),
            Box::new_unchecked(self.x + hw, self.y + hh, self.w - hw, self.h - hh),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Box::new(0, 0, -1, 4).is_err());
        assert!(Box::new(0, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_intersect() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(5, -3, 10, 6);
        assert_eq!(a.intersect(&b), Some(Box::new_unchecked(5, 0, 5, 3)));
        let c = Box::new_unchecked(10, 0, 4, 4);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_expand_then_shrink_restores() {
        let b = Box::new_unchecked(-2, 3, 7, 5);
        assert_eq!(b.expand(1, 2, 3, 4).shrink(1, 2, 3, 4), b);
    }

    #[test]
    fn test_shrink_saturates() {
        let b = Box::new_unchecked(0, 0, 2, 2).shrink(1, 1, 1, 1);
        assert!(b.is_empty());
        assert_eq!(b.area(), 0);
    }

    #[test]
    fn test_quadrants_cover_box() {
        let b = Box::new_unchecked(3, -1, 7, 5);
        let q = b.quadrants();
        assert_eq!(q[0], Box::new_unchecked(3, -1, 3, 2));
        assert_eq!(q[1], Box::new_unchecked(6, -1, 4, 2));
        assert_eq!(q[2], Box::new_unchecked(3, 1, 3, 3));
        assert_eq!(q[3], Box::new_unchecked(6, 1, 4, 3));
        let total: i64 = q.iter().map(|r| r.area()).sum();
        assert_eq!(total, b.area());
    }

    #[test]
    fn test_quadrants_of_thin_box() {
        let q = Box::new_unchecked(0, 0, 1, 1).quadrants();
        assert!(q[0].is_empty());
        assert!(q[1].is_empty());
        assert!(q[2].is_empty());
        assert_eq!(q[3], Box::new_unchecked(0, 0, 1, 1));
    }
}
