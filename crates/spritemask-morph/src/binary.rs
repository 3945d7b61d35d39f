//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for binary 8-bit
//! images. Any non-zero input pixel is foreground; outputs hold only 0 and
//! 255.
//!
//! Erosion and dilation write their output in four quadrants concurrently,
//! each worker reading the shared input and filling only its own rows.
//!
//! Output bounds follow the structuring element's padding:
//! - [`erode`] shrinks the input bounds by the padding
//! - [`dilate`] keeps the input bounds, [`dilate_padded`] grows them
//!
//! so [`open`] and [`close`] shrink by the padding once and [`cleanup`]
//! by three paddings.

use crate::{MorphError, MorphResult, Sel};
use log::debug;
use spritemask_core::{Box, Pix, PixMut, PixelDepth};

/// Dilate a binary image, cropped to the input bounds
///
/// An output pixel is set iff some hit of the SEL, placed with its anchor
/// on a set input pixel, covers it. Growth beyond the input bounds is
/// discarded; use [`dilate_padded`] to keep it.
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] unless the image is 8-bit.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    Ok(dilate_in(pix, sel, pix.bounds()))
}

/// Dilate a binary image, keeping the full growth
///
/// The output bounds are the input bounds expanded by [`Sel::padding`].
pub fn dilate_padded(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let (left, top, right, bottom) = sel.padding();
    Ok(dilate_in(pix, sel, pix.bounds().expand(left, top, right, bottom)))
}

/// Dilation over an arbitrary output region.
///
/// Gathers instead of stamping: `out(p)` is set iff `in(p - off)` is set
/// for some hit offset. Pixels outside the input count as unset.
fn dilate_in(pix: &Pix, sel: &Sel, bounds: Box) -> Pix {
    let offsets = sel.hit_offsets();
    let mut out = PixMut::new_in(bounds, PixelDepth::Bit8);
    out.par_for_each_quadrant(|mut quadrant| {
        let region = quadrant.region();
        for y in region.y..region.bottom() {
            let row = quadrant.row_mut(y);
            for (dst, x) in row.iter_mut().zip(region.x..region.right()) {
                if offsets.iter().any(|&(dx, dy)| pix.is_set(x - dx, y - dy)) {
                    *dst = 255;
                }
            }
        }
    });
    debug!(
        "dilate {:?} by {}x{} sel -> {:?}",
        pix.bounds(),
        sel.width(),
        sel.height(),
        bounds
    );
    out.into()
}

/// Erode a binary image
///
/// The output bounds are the input bounds shrunk by [`Sel::padding`]; an
/// image smaller than the SEL erodes to an empty image. An output pixel is
/// set iff every hit of the SEL, placed with its anchor on it, covers a set
/// input pixel. The scan stops at the first uncovered hit.
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] unless the image is 8-bit.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let (left, top, right, bottom) = sel.padding();
    let bounds = pix.bounds().shrink(left, top, right, bottom);
    let offsets = sel.hit_offsets();

    let mut out = PixMut::new_in(bounds, PixelDepth::Bit8);
    out.par_for_each_quadrant(|mut quadrant| {
        let region = quadrant.region();
        for y in region.y..region.bottom() {
            let row = quadrant.row_mut(y);
            for (dst, x) in row.iter_mut().zip(region.x..region.right()) {
                if offsets.iter().all(|&(dx, dy)| pix.is_set(x + dx, y + dy)) {
                    *dst = 255;
                }
            }
        }
    });
    debug!(
        "erode {:?} by {}x{} sel -> {:?}",
        pix.bounds(),
        sel.width(),
        sel.height(),
        bounds
    );
    Ok(out.into())
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Open the background of a binary image
///
/// Opens the inverted image and inverts the result back, so small
/// background specks are filled instead of foreground ones removed.
pub fn open_inverse(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    Ok(open(&pix.invert()?, sel)?.invert()?)
}

/// Close the background of a binary image
///
/// Closes the inverted image and inverts the result back.
pub fn close_inverse(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    Ok(close(&pix.invert()?, sel)?.invert()?)
}

/// Three-stage mask cleanup: `close(open(close(pix)))`
///
/// The outer closings fill gaps; the opening between them removes
/// residual specks.
///
/// # Example
///
/// ```
/// use spritemask_core::{Pix, PixelDepth};
/// use spritemask_morph::{Sel, cleanup};
///
/// let mut m = Pix::new(20, 20, PixelDepth::Bit8).unwrap().into_mut();
/// m.set_pixel(10, 10, 255).unwrap();
/// let sel = Sel::create_disk(3).unwrap();
/// let cleaned = cleanup(&m.into(), &sel).unwrap();
/// assert_eq!(cleaned.width(), 14);
/// assert_eq!(cleaned.count_set(), 0);
/// ```
pub fn cleanup(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let closed = close(pix, sel)?;
    let opened = open(&closed, sel)?;
    close(&opened, sel)
}

/// Check that the image is binary (8-bit, non-zero meaning set)
fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8-bit binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(bounds: Box, set: &[(i32, i32)]) -> Pix {
        let mut m = PixMut::new_in(bounds, PixelDepth::Bit8);
        for &(x, y) in set {
            m.set_pixel(x, y, 255).unwrap();
        }
        m.into()
    }

    fn filled(bounds: Box) -> Pix {
        let mut m = PixMut::new_in(bounds, PixelDepth::Bit8);
        m.fill(255);
        m.into()
    }

    #[test]
    fn test_dilate_single_pixel() {
        let sel = Sel::create_disk(3).unwrap();
        let pix = create_test_image(Box::from_size(5, 5), &[(2, 2)]);
        let out = dilate(&pix, &sel).unwrap();
        assert_eq!(out.bounds(), pix.bounds());
        assert_eq!(out.count_set(), 5);
        for (x, y) in [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)] {
            assert!(out.is_set(x, y));
        }
        assert!(!out.is_set(1, 1));
    }

    #[test]
    fn test_dilate_crops_and_padded_grows() {
        let sel = Sel::create_disk(3).unwrap();
        let pix = create_test_image(Box::from_size(1, 1), &[(0, 0)]);

        let cropped = dilate(&pix, &sel).unwrap();
        assert_eq!(cropped.bounds(), pix.bounds());
        assert_eq!(cropped.count_set(), 1);

        let padded = dilate_padded(&pix, &sel).unwrap();
        assert_eq!(padded.bounds(), Box::new_unchecked(-1, -1, 3, 3));
        assert_eq!(padded.count_set(), 5);
        assert!(padded.crop(&pix.bounds()).equals(&cropped));
    }

    #[test]
    fn test_dilate_asymmetric_sel() {
        // a single hit at offset (+2, +1) shifts the image
        let mask = create_test_image(Box::from_size(3, 2), &[(2, 1)]);
        let sel = Sel::new(mask, (0, 0)).unwrap();
        let pix = create_test_image(Box::from_size(6, 6), &[(1, 1)]);
        let out = dilate(&pix, &sel).unwrap();
        assert_eq!(out.count_set(), 1);
        assert!(out.is_set(3, 2));
    }

    #[test]
    fn test_erode_square() {
        let sel = Sel::create_disk(3).unwrap();
        let square: Vec<_> = (1..4).flat_map(|y| (1..4).map(move |x| (x, y))).collect();
        let pix = create_test_image(Box::from_size(5, 5), &square);
        let out = erode(&pix, &sel).unwrap();
        assert_eq!(out.bounds(), Box::new_unchecked(1, 1, 3, 3));
        assert_eq!(out.count_set(), 1);
        assert!(out.is_set(2, 2));
    }

    #[test]
    fn test_erode_to_empty() {
        let sel = Sel::create_disk(5).unwrap();
        let out = erode(&filled(Box::from_size(3, 3)), &sel).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.count_set(), 0);
    }

    #[test]
    fn test_any_nonzero_is_set() {
        let sel = Sel::create_disk(3).unwrap();
        let mut m = PixMut::new_in(Box::from_size(3, 3), PixelDepth::Bit8);
        m.fill(7);
        let out = erode(&m.into(), &sel).unwrap();
        assert_eq!(out.data(), &[255]);
    }

    #[test]
    fn test_open_removes_speck() {
        let sel = Sel::create_disk(3).unwrap();
        let mut set: Vec<_> = (2..7).flat_map(|y| (2..7).map(move |x| (x, y))).collect();
        set.push((9, 9));
        let pix = create_test_image(Box::from_size(12, 12), &set);
        let out = open(&pix, &sel).unwrap();
        assert_eq!(out.bounds(), Box::new_unchecked(1, 1, 10, 10));
        assert!(!out.is_set(9, 9));
        assert!(out.is_set(4, 4));
        for y in 1..11 {
            for x in 1..11 {
                assert!(!out.is_set(x, y) || pix.is_set(x, y));
            }
        }
    }

    #[test]
    fn test_close_fills_hole() {
        let sel = Sel::create_disk(3).unwrap();
        let mut m = filled(Box::from_size(7, 7)).into_mut();
        m.set_pixel(3, 3, 0).unwrap();
        let out = close(&m.into(), &sel).unwrap();
        assert_eq!(out.bounds(), Box::new_unchecked(1, 1, 5, 5));
        assert_eq!(out.count_set(), 25);
    }

    #[test]
    fn test_inverse_duality() {
        let sel = Sel::create_disk(3).unwrap();
        let set: Vec<_> = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .filter(|&(x, y)| (x * 7 + y * 3) % 5 < 2)
            .collect();
        let pix = create_test_image(Box::from_size(10, 10), &set);

        let ci = close_inverse(&pix, &sel).unwrap();
        let expected = close(&pix.invert().unwrap(), &sel).unwrap().invert().unwrap();
        assert!(ci.equals(&expected));

        let oi = open_inverse(&pix, &sel).unwrap();
        let expected = open(&pix.invert().unwrap(), &sel).unwrap().invert().unwrap();
        assert!(oi.equals(&expected));
    }

    #[test]
    fn test_cleanup_bounds() {
        let sel = Sel::create_disk(3).unwrap();
        let out = cleanup(&filled(Box::from_size(100, 100)), &sel).unwrap();
        assert_eq!(out.bounds(), Box::new_unchecked(3, 3, 94, 94));
        assert_eq!(out.count_set(), 94 * 94);
    }

    #[test]
    fn test_rejects_rgb() {
        let sel = Sel::create_disk(3).unwrap();
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            dilate(&pix, &sel),
            Err(MorphError::UnsupportedDepth { .. })
        ));
        assert!(erode(&pix, &sel).is_err());
        assert!(close_inverse(&pix, &sel).is_err());
    }
}
