//! Whole-image operations
//!
//! Inversion, cropping, foreground counting and region comparison.

use super::{Pix, PixData, PixelDepth};
use crate::box_::Box;
use crate::error::{Error, Result};
use std::sync::Arc;

impl Pix {
    /// Invert an 8-bit image (`v -> 255 - v`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 8-bit.
    pub fn invert(&self) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let mut out = self.to_mut();
        for v in out.data_mut() {
            *v = 255 - *v;
        }
        Ok(out.into())
    }

    /// Copy the part of the image inside `region`.
    ///
    /// The result keeps absolute coordinates: its bounds are the
    /// intersection of `region` with the image bounds. A region that
    /// misses the image gives an empty image anchored at `region`.
    pub fn crop(&self, region: &Box) -> Pix {
        let Some(clip) = self.bounds().intersect(region) else {
            return Pix::new_in(Box::new_unchecked(region.x, region.y, 0, 0), self.depth());
        };
        let bpp = self.depth().bytes();
        let col = (clip.x - self.bounds().x) as usize * bpp;
        let len = clip.w as usize * bpp;
        let mut data = Vec::with_capacity(len * clip.h as usize);
        for y in clip.y..clip.bottom() {
            data.extend_from_slice(&self.row_data(y)[col..col + len]);
        }
        Pix {
            inner: Arc::new(PixData {
                bounds: clip,
                depth: self.depth(),
                spp: self.spp(),
                alpha: self.alpha_mode(),
                data,
            }),
        }
    }

    /// Count pixels with a non-zero value.
    ///
    /// For 32-bit images a pixel counts when any of its bytes is set.
    pub fn count_set(&self) -> u64 {
        let bpp = self.depth().bytes();
        self.data()
            .chunks_exact(bpp)
            .filter(|px| px.iter().any(|&b| b != 0))
            .count() as u64
    }

    /// Check whether two images have identical bounds, depth and pixels.
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Compare two images over `region` only.
    ///
    /// Both images must cover `region` completely and share a depth;
    /// otherwise the images are reported as different.
    pub fn equals_in(&self, other: &Pix, region: &Box) -> bool {
        if self.depth() != other.depth() {
            return false;
        }
        if region.is_empty() {
            return true;
        }
        if !self.bounds().contains_box(region) || !other.bounds().contains_box(region) {
            return false;
        }
        let bpp = self.depth().bytes();
        let len = region.w as usize * bpp;
        let a0 = (region.x - self.bounds().x) as usize * bpp;
        let b0 = (region.x - other.bounds().x) as usize * bpp;
        (region.y..region.bottom())
            .all(|y| self.row_data(y)[a0..a0 + len] == other.row_data(y)[b0..b0 + len])
    }
}
