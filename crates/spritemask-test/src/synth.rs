//! Synthetic test images
//!
//! Deterministic images for tests that need known shapes and noise
//! without shipping data files.

use spritemask_core::{Box, Pix, PixMut, PixelDepth, Result};

/// Deterministic pseudo-random generator for reproducible noise
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a generator from a seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    /// Advance and return the raw 64-bit state
    pub fn next(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Return a value in `0..bound` taken from the high bits
    pub fn next_below(&mut self, bound: u32) -> u32 {
        ((self.next() >> 33) % bound as u64) as u32
    }
}

/// Build a `w` x `h` binary image holding a filled disk.
///
/// Pixels with `(x - cx)^2 + (y - cy)^2 <= radius^2` are 255, the rest 0.
///
/// # Errors
///
/// Returns an error if the size does not fit the coordinate range.
pub fn make_disk_image(w: u32, h: u32, cx: i32, cy: i32, radius: i32) -> Result<Pix> {
    let mut pix = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
    let r2 = radius as i64 * radius as i64;
    let b = pix.bounds();
    for y in b.y..b.bottom() {
        for x in b.x..b.right() {
            let (dx, dy) = ((x - cx) as i64, (y - cy) as i64);
            if dx * dx + dy * dy <= r2 {
                pix.set_pixel_unchecked(x, y, 255);
            }
        }
    }
    Ok(pix.into())
}

/// Flip pixels of a binary image at random.
///
/// Every pixel is visited in row-major order and flipped between 0 and
/// 255 with probability `percent / 100`. The same seed always gives the
/// same noise.
pub fn add_salt_and_pepper(pix: &Pix, percent: u32, seed: u32) -> Pix {
    let mut rng = SimpleRng::new(seed);
    let mut out = pix.to_mut();
    let b = out.bounds();
    for y in b.y..b.bottom() {
        for x in b.x..b.right() {
            if rng.next_below(100) < percent {
                let v = out.get_pixel_unchecked(x, y);
                out.set_pixel_unchecked(x, y, if v != 0 { 0 } else { 255 });
            }
        }
    }
    out.into()
}

/// Build a binary image of random foreground confined to `interior`.
///
/// Each pixel inside `interior` is set with probability one half; the
/// rest of `bounds` stays background.
pub fn make_random_blob(bounds: Box, interior: Box, seed: u32) -> Pix {
    let mut rng = SimpleRng::new(seed);
    let mut out = PixMut::new_in(bounds, PixelDepth::Bit8);
    if let Some(inner) = bounds.intersect(&interior) {
        for y in inner.y..inner.bottom() {
            for x in inner.x..inner.right() {
                if rng.next_below(2) == 1 {
                    out.set_pixel_unchecked(x, y, 255);
                }
            }
        }
    }
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = SimpleRng::new(42);
        let mut b = SimpleRng::new(42);
        for _ in 0..10 {
            assert_eq!(a.next(), b.next());
        }
        assert_ne!(SimpleRng::new(1).next(), SimpleRng::new(2).next());
    }

    #[test]
    fn test_disk_image() {
        let pix = make_disk_image(11, 11, 5, 5, 2).unwrap();
        assert!(pix.is_set(5, 5));
        assert!(pix.is_set(7, 5));
        assert!(!pix.is_set(7, 7));
        assert_eq!(pix.count_set(), 13);
    }

    #[test]
    fn test_salt_and_pepper_rate() {
        let pix = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
        let noisy = add_salt_and_pepper(&pix, 1, 42);
        let flipped = noisy.count_set();
        assert!(flipped > 50 && flipped < 150, "flipped {flipped}");
        assert!(add_salt_and_pepper(&pix, 0, 42).equals(&pix));
    }

    #[test]
    fn test_random_blob_stays_inside() {
        let bounds = Box::from_size(20, 20);
        let interior = Box::new_unchecked(5, 5, 10, 10);
        let pix = make_random_blob(bounds, interior, 3);
        assert!(pix.count_set() > 0);
        for y in 0..20 {
            for x in 0..20 {
                if pix.is_set(x, y) {
                    assert!(interior.contains_point(x, y));
                }
            }
        }
    }
}
