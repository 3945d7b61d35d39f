//! Quadrant fork-join over an output image
//!
//! An image is split at the midpoints of its width and height into four
//! disjoint regions. Each [`RegionMut`] owns mutable slices of exactly the
//! rows and columns of its quadrant, so four workers can write the same
//! image concurrently without locking.

use super::{PixMut, PixelDepth};
use crate::box_::Box;
use crate::color;

/// Mutable view of one rectangular region of a [`PixMut`].
///
/// Coordinates are absolute, like everywhere else on `Pix`.
#[derive(Debug)]
pub struct RegionMut<'a> {
    region: Box,
    depth: PixelDepth,
    rows: Vec<&'a mut [u8]>,
}

impl RegionMut<'_> {
    /// Get the region covered by this view.
    #[inline]
    pub fn region(&self) -> Box {
        self.region
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    /// Get the bytes of row `y`, restricted to the region's columns.
    ///
    /// # Panics
    ///
    /// Panics if `y` lies outside the region.
    #[inline]
    pub fn row_mut(&mut self, y: i32) -> &mut [u8] {
        let r = self.region;
        assert!(y >= r.y && y < r.bottom(), "row {y} outside region {r:?}");
        &mut *self.rows[(y - r.y) as usize]
    }

    /// Set a pixel without bounds checking.
    ///
    /// 8-bit values are clamped to 255; 32-bit values are packed RGBA.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the region.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: i32, y: i32, val: u32) {
        let region = self.region;
        assert!(
            x >= region.x && x < region.right(),
            "column {x} outside region {region:?}"
        );
        let col = (x - region.x) as usize * self.depth.bytes();
        let depth = self.depth;
        let row = self.row_mut(y);
        match depth {
            PixelDepth::Bit8 => row[col] = val.min(255) as u8,
            PixelDepth::Bit32 => {
                let (r, g, b, a) = color::extract_rgba(val);
                row[col..col + 4].copy_from_slice(&[r, g, b, a]);
            }
        }
    }
}

/// Split each row of `half` at byte `left`.
fn split_rows(half: &mut [u8], stride: usize, left: usize) -> (Vec<&mut [u8]>, Vec<&mut [u8]>) {
    if stride == 0 {
        return (Vec::new(), Vec::new());
    }
    half.chunks_mut(stride)
        .map(|row| row.split_at_mut(left))
        .unzip()
}

impl PixMut {
    /// Split the image into four disjoint mutable quadrants.
    ///
    /// Order: top-left, top-right, bottom-left, bottom-right, as given by
    /// [`Box::quadrants`]. Quadrants of small images may be empty.
    pub fn split_quadrants_mut(&mut self) -> [RegionMut<'_>; 4] {
        let [tl, tr, bl, br] = self.inner.bounds.quadrants();
        let depth = self.inner.depth;
        let stride = self.inner.stride();
        let left = tl.w as usize * depth.bytes();
        let top_len = tl.h as usize * stride;

        let (top, bottom) = self.inner.data.split_at_mut(top_len);
        let (tl_rows, tr_rows) = split_rows(top, stride, left);
        let (bl_rows, br_rows) = split_rows(bottom, stride, left);

        let view = |region, rows| RegionMut {
            region,
            depth,
            rows,
        };
        [
            view(tl, tl_rows),
            view(tr, tr_rows),
            view(bl, bl_rows),
            view(br, br_rows),
        ]
    }

    /// Run `f` on the four quadrants of the image concurrently.
    ///
    /// Returns once all workers have finished. Empty quadrants are
    /// skipped.
    pub fn par_for_each_quadrant<F>(&mut self, f: F)
    where
        F: Fn(RegionMut<'_>) + Sync,
    {
        let quadrants = self.split_quadrants_mut();
        let f = &f;
        rayon::scope(|s| {
            for quadrant in quadrants {
                if quadrant.region().is_empty() {
                    continue;
                }
                s.spawn(move |_| f(quadrant));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pix;

    #[test]
    fn test_split_matches_box_quadrants() {
        let bounds = Box::new_unchecked(-2, 3, 5, 3);
        let mut m = PixMut::new_in(bounds, PixelDepth::Bit8);
        let regions: Vec<Box> = m.split_quadrants_mut().iter().map(|q| q.region()).collect();
        assert_eq!(regions, bounds.quadrants().to_vec());
    }

    #[test]
    fn test_each_quadrant_writes_its_own_pixels() {
        let bounds = Box::new_unchecked(10, -4, 7, 5);
        let mut m = PixMut::new_in(bounds, PixelDepth::Bit8);
        for (i, mut q) in m.split_quadrants_mut().into_iter().enumerate() {
            let r = q.region();
            for y in r.y..r.bottom() {
                q.row_mut(y).fill(i as u8 + 1);
            }
        }
        let pix: Pix = m.into();
        let quads = bounds.quadrants();
        for y in bounds.y..bounds.bottom() {
            for x in bounds.x..bounds.right() {
                let owner = quads.iter().position(|q| q.contains_point(x, y)).unwrap();
                assert_eq!(pix.get_pixel(x, y), Some(owner as u32 + 1));
            }
        }
    }

    #[test]
    fn test_par_for_each_quadrant_covers_image() {
        let bounds = Box::new_unchecked(0, 0, 9, 4);
        let mut m = PixMut::new_in(bounds, PixelDepth::Bit32);
        m.par_for_each_quadrant(|mut q| {
            let r = q.region();
            for y in r.y..r.bottom() {
                for x in r.x..r.right() {
                    q.set_pixel_unchecked(x, y, color::compose_rgba(x as u8, y as u8, 0, 255));
                }
            }
        });
        let pix: Pix = m.into();
        for y in 0..4 {
            for x in 0..9 {
                assert_eq!(pix.get_rgba(x, y), Some((x as u8, y as u8, 0, 255)));
            }
        }
    }

    #[test]
    fn test_degenerate_images() {
        for bounds in [Box::from_size(0, 3), Box::from_size(3, 0), Box::from_size(1, 1)] {
            let mut m = PixMut::new_in(bounds, PixelDepth::Bit8);
            m.par_for_each_quadrant(|mut q| {
                let r = q.region();
                for y in r.y..r.bottom() {
                    q.row_mut(y).fill(255);
                }
            });
            let pix: Pix = m.into();
            assert_eq!(pix.count_set(), bounds.area() as u64);
        }
    }
}
