//! Binary thresholding
//!
//! Provides methods for converting grayscale images to binary:
//! - Fixed threshold binarization
//! - Otsu's method (automatic threshold selection)
//!
//! Binary images are 8-bit with values 0 (background) and 255
//! (foreground). A pixel is background iff its value is below the level.

use crate::ColorResult;
use crate::grayscale::require_gray;
use log::debug;
use spritemask_core::{Histogram, Pix, PixMut};

/// Compute Otsu's threshold level from a histogram
///
/// Every split point is tried in a single forward pass: the background
/// class holds the levels `0..level`, the foreground `level..=255`. The
/// level maximizing the between-class variance `wB * wF * (mB - mF)^2`
/// wins; on ties the lowest such level is kept.
///
/// Returns 0 when no split leaves both classes non-empty (a constant or
/// empty image), so that every pixel is classified as foreground.
pub fn otsu_level(hist: &Histogram) -> u8 {
    let counts = hist.counts();
    let total = hist.total();
    let sum: f64 = counts
        .iter()
        .enumerate()
        .map(|(v, &c)| v as f64 * c as f64)
        .sum();

    let mut sum_b = 0.0f64;
    let mut wb = 0u64;
    let mut var_max = 0.0f64;
    let mut level = 0u8;

    for (t, &count) in counts.iter().enumerate() {
        wb += count;
        if wb == 0 {
            continue;
        }
        let wf = total - wb;
        if wf == 0 {
            break;
        }

        sum_b += t as f64 * count as f64;
        let mb = sum_b / wb as f64;
        let mf = (sum - sum_b) / wf as f64;
        let var_between = wb as f64 * wf as f64 * (mb - mf) * (mb - mf);

        if var_between > var_max {
            var_max = var_between;
            // t < 255 here since the foreground is non-empty
            level = (t + 1) as u8;
        }
    }

    level
}

/// Binarize an 8-bit image in place
///
/// Pixels below `level` become 0, all others 255. Applying the same level
/// twice changes nothing.
///
/// # Errors
///
/// Returns an error unless the image is 8-bit.
pub fn threshold_in_place(pix: &mut PixMut, level: u8) -> ColorResult<()> {
    require_gray(pix.depth())?;
    for v in pix.data_mut() {
        *v = if *v < level { 0 } else { 255 };
    }
    Ok(())
}

/// Convert a grayscale image to binary using a fixed threshold
///
/// Pixels >= `level` become foreground (255), pixels below it background (0).
pub fn threshold_to_binary(pix: &Pix, level: u8) -> ColorResult<Pix> {
    require_gray(pix.depth())?;
    let mut out = pix.to_mut();
    threshold_in_place(&mut out, level)?;
    Ok(out.into())
}

/// Convert a grayscale image to binary using Otsu's method
///
/// # Returns
///
/// The binarized image and the level that was applied.
///
/// # Example
///
/// ```
/// use spritemask_color::threshold_otsu;
/// use spritemask_core::{Box, Pix, PixelDepth};
///
/// let pix = Pix::from_data(Box::from_size(4, 1), PixelDepth::Bit8, 1, vec![10, 10, 200, 200])
///     .unwrap();
/// let (binary, level) = threshold_otsu(&pix).unwrap();
/// assert!(level > 10 && level < 200);
/// assert_eq!(binary.data(), &[0, 0, 255, 255]);
/// ```
pub fn threshold_otsu(pix: &Pix) -> ColorResult<(Pix, u8)> {
    require_gray(pix.depth())?;
    let hist = pix.gray_histogram()?;
    let level = otsu_level(&hist);
    debug!("otsu level {} over {} pixels", level, hist.total());
    Ok((threshold_to_binary(pix, level)?, level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritemask_core::{Box, PixelDepth};

    fn hist_of(pairs: &[(usize, u64)]) -> Histogram {
        let mut counts = [0u64; 256];
        for &(level, n) in pairs {
            counts[level] = n;
        }
        Histogram::from_counts(counts)
    }

    #[test]
    fn test_two_spikes() {
        let level = otsu_level(&hist_of(&[(10, 500), (200, 500)]));
        assert_eq!(level, 11);
    }

    #[test]
    fn test_spread_peaks_lie_between() {
        let mut pairs = Vec::new();
        for d in 0..5 {
            pairs.push((8 + d, 100 - 20 * (d as i64 - 2).unsigned_abs()));
            pairs.push((198 + d, 60 - 10 * (d as i64 - 2).unsigned_abs()));
        }
        let level = otsu_level(&hist_of(&pairs));
        assert!(level > 12 && level <= 198, "level {level}");
    }

    #[test]
    fn test_unbalanced_classes() {
        // a small bright class still pulls the level above the dark mass
        let level = otsu_level(&hist_of(&[(20, 900), (30, 50), (220, 50)]));
        assert!(level > 30 && level <= 220, "level {level}");
    }

    #[test]
    fn test_constant_and_empty() {
        assert_eq!(otsu_level(&hist_of(&[(77, 1000)])), 0);
        assert_eq!(otsu_level(&Histogram::default()), 0);
    }

    #[test]
    fn test_binary_input_is_preserved() {
        let pix = Pix::from_data(Box::from_size(3, 1), PixelDepth::Bit8, 1, vec![0, 255, 0])
            .unwrap();
        let (binary, level) = threshold_otsu(&pix).unwrap();
        assert_eq!(level, 1);
        assert!(binary.equals(&pix));
    }

    #[test]
    fn test_constant_image_maps_to_foreground() {
        let pix = Pix::from_data(Box::from_size(2, 2), PixelDepth::Bit8, 1, vec![42; 4]).unwrap();
        let (binary, level) = threshold_otsu(&pix).unwrap();
        assert_eq!(level, 0);
        assert_eq!(binary.data(), &[255; 4]);
    }

    #[test]
    fn test_threshold_in_place_idempotent() {
        let mut m = Pix::from_data(Box::from_size(5, 1), PixelDepth::Bit8, 1, vec![0, 99, 100, 101, 255])
            .unwrap()
            .into_mut();
        threshold_in_place(&mut m, 100).unwrap();
        assert_eq!(m.data(), &[0, 0, 255, 255, 255]);
        threshold_in_place(&mut m, 100).unwrap();
        assert_eq!(m.data(), &[0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(threshold_otsu(&pix).is_err());
        assert!(threshold_in_place(&mut pix.to_mut(), 10).is_err());
    }
}
