//! Pta - Point arrays
//!
//! Ordered lists of integer pixel coordinates. The ellipse rasterizer
//! returns its outline as a `Pta`, in traversal order.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).

/// Array of points.
///
/// Stores 2D integer points as parallel x/y coordinate vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pta {
    /// X coordinates
    x: Vec<i32>,
    /// Y coordinates
    y: Vec<i32>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Get a point by index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: usize) -> Option<(i32, i32)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Add a point.
    pub fn push(&mut self, x: i32, y: i32) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Iterate over points in order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Check whether a point is present.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.iter().any(|p| p == (x, y))
    }
}

impl FromIterator<(i32, i32)> for Pta {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut pta = Pta::new();
        for (x, y) in iter {
            pta.push(x, y);
        }
        pta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut pta = Pta::with_capacity(2);
        pta.push(1, -2);
        pta.push(3, 4);
        assert_eq!(pta.len(), 2);
        assert_eq!(pta.get(0), Some((1, -2)));
        assert_eq!(pta.get(1), Some((3, 4)));
        assert_eq!(pta.get(2), None);
    }

    #[test]
    fn test_collect_preserves_order() {
        let pta: Pta = [(0, 0), (1, 0), (1, 1)].into_iter().collect();
        let pts: Vec<_> = pta.iter().collect();
        assert_eq!(pts, vec![(0, 0), (1, 0), (1, 1)]);
        assert!(pta.contains(1, 0));
        assert!(!pta.contains(0, 1));
    }
}
