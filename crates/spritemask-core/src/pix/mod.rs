//! PIX - The main image container
//!
//! The `Pix` structure is the image type shared by every stage of the
//! pipeline: decoded sprites, grayscale images, binary masks and
//! structuring elements.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, one row directly after another
//! - 8-bit images use one byte per pixel
//! - 32-bit images use four bytes per pixel in R, G, B, A order
//! - Every image covers a rectangular [`Box`]; the origin need not be (0, 0)
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
pub mod graphics;
mod histogram;
mod ops;
mod quadrant;

pub use histogram::Histogram;
pub use quadrant::RegionMut;

use crate::box_::Box;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale or binary (0/255)
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 8 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the number of bytes per pixel.
    #[inline]
    pub fn bytes(self) -> usize {
        (self as u32 / 8) as usize
    }
}

/// How the color channels of a 32-bit image relate to its alpha
///
/// Decoders record this so gray conversion can tell formats whose alpha is
/// carried along from formats whose transparent pixels must be composited
/// over black first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Channels are used as stored; alpha is ignored
    #[default]
    Ignore,
    /// Channels are weighted by alpha before use
    Premultiply,
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Coordinate domain covered by the image
    bounds: Box,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// Alpha handling recorded by the decoder
    alpha: AlphaMode,
    /// The image data, row-major
    data: Vec<u8>,
}

impl PixData {
    fn zeroed(bounds: Box, depth: PixelDepth) -> Self {
        let spp = match depth {
            PixelDepth::Bit32 => 3, // Default to RGB
            PixelDepth::Bit8 => 1,
        };
        let size = bounds.area() as usize * depth.bytes();
        PixData {
            bounds,
            depth,
            spp,
            alpha: AlphaMode::default(),
            data: vec![0u8; size],
        }
    }

    #[inline]
    fn stride(&self) -> usize {
        self.bounds.w.max(0) as usize * self.depth.bytes()
    }

    /// Byte offset of (x, y), or `None` outside the bounds.
    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains_point(x, y) {
            return None;
        }
        let col = (x - self.bounds.x) as usize;
        let row = (y - self.bounds.y) as usize;
        Some(row * self.stride() + col * self.depth.bytes())
    }
}

/// PIX - Main image container
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use spritemask_core::{Pix, PixelDepth};
///
/// // Create a new 8-bit grayscale image
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with its origin at (0, 0).
    ///
    /// The image data is initialized to zero. A zero width or height
    /// gives an empty image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a dimension does not fit
    /// in an `i32`.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(Error::InvalidParameter(format!(
                "image size {width}x{height} exceeds the coordinate range"
            )));
        };
        Ok(Self::new_in(Box::from_size(w, h), depth))
    }

    /// Create a new zeroed PIX covering `bounds`.
    ///
    /// Negative sizes are treated as empty.
    pub fn new_in(bounds: Box, depth: PixelDepth) -> Self {
        let bounds = Box::new_unchecked(bounds.x, bounds.y, bounds.w.max(0), bounds.h.max(0));
        Pix {
            inner: Arc::new(PixData::zeroed(bounds, depth)),
        }
    }

    /// Create a PIX from raw row-major pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `data` does not hold exactly
    /// one pixel per bounds position, or if `spp` does not fit the depth.
    pub fn from_data(bounds: Box, depth: PixelDepth, spp: u32, data: Vec<u8>) -> Result<Self> {
        let bounds = Box::new(bounds.x, bounds.y, bounds.w, bounds.h)?;
        let expected = bounds.area() as usize * depth.bytes();
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "pixel data has {} bytes, expected {} for {}x{} at {} bpp",
                data.len(),
                expected,
                bounds.w,
                bounds.h,
                depth.bits()
            )));
        }
        let spp_ok = match depth {
            PixelDepth::Bit8 => spp == 1,
            PixelDepth::Bit32 => spp == 3 || spp == 4,
        };
        if !spp_ok {
            return Err(Error::InvalidParameter(format!(
                "spp {} is not valid for {} bpp",
                spp,
                depth.bits()
            )));
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                bounds,
                depth,
                spp,
                alpha: AlphaMode::default(),
                data,
            }),
        })
    }

    /// Get the coordinate domain of the image.
    #[inline]
    pub fn bounds(&self) -> Box {
        self.inner.bounds
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.bounds.w as u32
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.bounds.h as u32
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the alpha handling recorded for this image.
    #[inline]
    pub fn alpha_mode(&self) -> AlphaMode {
        self.inner.alpha
    }

    /// Check whether the image covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.bounds.is_empty()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the bytes of one row.
    ///
    /// `y` is an absolute coordinate within the bounds.
    ///
    /// # Panics
    ///
    /// Panics if `y` lies outside the bounds.
    #[inline]
    pub fn row_data(&self, y: i32) -> &[u8] {
        let b = self.inner.bounds;
        assert!(y >= b.y && y < b.bottom(), "row {y} outside bounds {b:?}");
        let stride = self.inner.stride();
        let start = (y - b.y) as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Check if two PIX have the same bounds and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.bounds == other.inner.bounds && self.inner.depth == other.inner.depth
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                bounds: self.inner.bounds,
                depth: self.inner.depth,
                spp: self.inner.spp,
                alpha: self.inner.alpha,
                data: self.inner.data.clone(),
            },
        }
    }

    /// Get mutable access, copying only when the data is shared.
    pub fn into_mut(self) -> PixMut {
        self.try_into_mut().unwrap_or_else(|shared| shared.to_mut())
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`. Exclusive access is enforced at compile
/// time, which is what lets thresholding and flood fill run in place.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed mutable PIX covering `bounds`.
    pub fn new_in(bounds: Box, depth: PixelDepth) -> Self {
        Pix::new_in(bounds, depth).into_mut()
    }

    /// Get the coordinate domain of the image.
    #[inline]
    pub fn bounds(&self) -> Box {
        self.inner.bounds
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.bounds.w as u32
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.bounds.h as u32
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Set samples per pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `spp` does not fit the depth.
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        let ok = match self.inner.depth {
            PixelDepth::Bit8 => spp == 1,
            PixelDepth::Bit32 => spp == 3 || spp == 4,
        };
        if !ok {
            return Err(Error::InvalidParameter(format!(
                "spp {} is not valid for {} bpp",
                spp,
                self.inner.depth.bits()
            )));
        }
        self.inner.spp = spp;
        Ok(())
    }

    /// Get the alpha handling recorded for this image.
    #[inline]
    pub fn alpha_mode(&self) -> AlphaMode {
        self.inner.alpha
    }

    /// Record how the alpha channel must be handled.
    pub fn set_alpha_mode(&mut self, mode: AlphaMode) {
        self.inner.alpha = mode;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to one row.
    ///
    /// # Panics
    ///
    /// Panics if `y` lies outside the bounds.
    #[inline]
    pub fn row_data_mut(&mut self, y: i32) -> &mut [u8] {
        let b = self.inner.bounds;
        assert!(y >= b.y && y < b.bottom(), "row {y} outside bounds {b:?}");
        let stride = self.inner.stride();
        let start = (y - b.y) as usize * stride;
        &mut self.inner.data[start..start + stride]
    }

    /// Set every byte of the image to `val`.
    pub fn fill(&mut self, val: u8) {
        self.inner.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
