//! Grayscale conversion
//!
//! Converts color images to 8-bit luma with fixed-point weights
//! (0.299, 0.587, 0.114 scaled to 16 bits). Channels are widened to 16
//! bits before weighting, so 0 and 255 map exactly to 0 and 255.
//!
//! Every conversion writes its output in four quadrants concurrently.

use crate::error::{ColorError, ColorResult};
use log::debug;
use spritemask_core::color::widen16;
use spritemask_core::{AlphaMode, Box, Pix, PixMut, PixelDepth};

/// Red weight (0.299 * 65536)
pub const LUMA_R: u32 = 19595;
/// Green weight (0.587 * 65536)
pub const LUMA_G: u32 = 38470;
/// Blue weight (0.114 * 65536)
pub const LUMA_B: u32 = 7471;

/// Convert 16-bit channels to an 8-bit gray value.
///
/// The weights sum to 65536, so the result is rounded to nearest and
/// never exceeds 255.
#[inline]
pub fn luma16(r: u32, g: u32, b: u32) -> u8 {
    ((LUMA_R * r + LUMA_G * g + LUMA_B * b + (1 << 15)) >> 24) as u8
}

/// Convert 8-bit RGB to gray with the same weights as [`luma16`].
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    luma16(widen16(r), widen16(g), widen16(b))
}

/// A source of color pixels for the generic conversion path.
///
/// Implementors report alpha-premultiplied RGBA with 16 bits per channel
/// (0..=65535) for any position inside [`ColorSource::bounds`].
pub trait ColorSource: Sync {
    /// The region the source covers
    fn bounds(&self) -> Box;

    /// Premultiplied 16-bit `(r, g, b, a)` at an absolute position
    fn rgba16(&self, x: i32, y: i32) -> (u32, u32, u32, u32);
}

impl ColorSource for Pix {
    fn bounds(&self) -> Box {
        Pix::bounds(self)
    }

    fn rgba16(&self, x: i32, y: i32) -> (u32, u32, u32, u32) {
        let (r, g, b, a) = self.get_rgba(x, y).unwrap_or_default();
        let a = if self.depth() == PixelDepth::Bit32 && self.spp() == 4 {
            widen16(a)
        } else {
            0xffff
        };
        let premul = |c: u8| widen16(c) * a / 0xffff;
        (premul(r), premul(g), premul(b), a)
    }
}

/// Convert an image to 8-bit gray.
///
/// - 32-bit input marked [`AlphaMode::Ignore`] takes the direct path:
///   channels are read as stored and alpha is ignored.
/// - 32-bit input marked [`AlphaMode::Premultiply`] and 8-bit input go
///   through the generic [`ColorSource`] path. Transparent pixels become
///   black there; for gray input it is the identity.
///
/// The output has the same bounds as the input.
///
/// # Example
///
/// ```
/// use spritemask_color::convert_to_gray;
/// use spritemask_core::{Pix, PixelDepth};
///
/// let mut m = Pix::new(2, 1, PixelDepth::Bit32).unwrap().into_mut();
/// m.set_rgba(1, 0, 255, 255, 255, 0).unwrap();
/// let gray = convert_to_gray(&m.into()).unwrap();
/// assert_eq!(gray.get_pixel(0, 0), Some(0));
/// assert_eq!(gray.get_pixel(1, 0), Some(255));
/// ```
pub fn convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    match (pix.depth(), pix.alpha_mode()) {
        (PixelDepth::Bit32, AlphaMode::Ignore) => Ok(convert_rgba_to_gray(pix)),
        _ => Ok(convert_source_to_gray(pix)),
    }
}

/// Direct path for 32-bit images.
fn convert_rgba_to_gray(pix: &Pix) -> Pix {
    let bounds = pix.bounds();
    let mut out = PixMut::new_in(bounds, PixelDepth::Bit8);
    out.par_for_each_quadrant(|mut quadrant| {
        let region = quadrant.region();
        let start = (region.x - bounds.x) as usize * 4;
        let end = start + region.w as usize * 4;
        for y in region.y..region.bottom() {
            let src = &pix.row_data(y)[start..end];
            for (dst, px) in quadrant.row_mut(y).iter_mut().zip(src.chunks_exact(4)) {
                *dst = rgb_to_gray(px[0], px[1], px[2]);
            }
        }
    });
    debug!("converted {}x{} RGB image to gray", bounds.w, bounds.h);
    out.into()
}

/// Convert any [`ColorSource`] to 8-bit gray.
///
/// The luma weights are applied to the premultiplied channels, so a
/// transparent pixel becomes black.
pub fn convert_source_to_gray<S: ColorSource + ?Sized>(src: &S) -> Pix {
    let bounds = src.bounds();
    let mut out = PixMut::new_in(bounds, PixelDepth::Bit8);
    out.par_for_each_quadrant(|mut quadrant| {
        let region = quadrant.region();
        for y in region.y..region.bottom() {
            let row = quadrant.row_mut(y);
            for (dst, x) in row.iter_mut().zip(region.x..region.right()) {
                let (r, g, b, _) = src.rgba16(x, y);
                *dst = luma16(r, g, b);
            }
        }
    });
    debug!("converted {}x{} image to gray", bounds.w, bounds.h);
    out.into()
}

/// Require an 8-bit image.
pub(crate) fn require_gray(depth: PixelDepth) -> ColorResult<()> {
    if depth != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8-bit",
            actual: depth.bits(),
        });
    }
    Ok(())
}
