//! Histogram generation for Pix images
//!
//! Gray level distributions feed the Otsu threshold search.

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

/// Number of gray levels in an 8-bit histogram
pub const GRAY_LEVELS: usize = 256;

/// 256-bin gray level histogram
///
/// `counts()[v]` is the number of pixels with gray value `v`. The sum of
/// all bins always equals `total()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; GRAY_LEVELS],
    total: u64,
}

impl Histogram {
    /// Create a histogram from explicit bin counts.
    pub fn from_counts(counts: [u64; GRAY_LEVELS]) -> Self {
        let total = counts.iter().sum();
        Self { counts, total }
    }

    /// Get all bins.
    #[inline]
    pub fn counts(&self) -> &[u64; GRAY_LEVELS] {
        &self.counts
    }

    /// Get the count for a single gray level.
    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Get the number of pixels counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Check whether no pixels were counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            counts: [0; GRAY_LEVELS],
            total: 0,
        }
    }
}

impl Pix {
    /// Get the gray level histogram of the image.
    ///
    /// Every pixel in the bounds is counted once. An empty image gives
    /// an all-zero histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 8-bit.
    ///
    /// # Example
    ///
    /// ```
    /// use spritemask_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram().unwrap();
    /// assert_eq!(hist.count(0), 100);
    /// assert_eq!(hist.total(), 100);
    /// ```
    pub fn gray_histogram(&self) -> Result<Histogram> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let mut counts = [0u64; GRAY_LEVELS];
        for &v in self.data() {
            counts[v as usize] += 1;
        }
        Ok(Histogram::from_counts(counts))
    }
}
