//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Coordinates are absolute: `(x, y)` must lie inside the image's
//! bounds, which need not start at (0, 0).
//!
//! 8-bit pixels are returned as their byte value. 32-bit pixels are
//! returned packed as `0xRRGGBBAA` (see [`crate::color`]).

use super::{Pix, PixData, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl PixData {
    #[inline]
    fn read(&self, offset: usize) -> u32 {
        match self.depth {
            PixelDepth::Bit8 => self.data[offset] as u32,
            PixelDepth::Bit32 => {
                let p = &self.data[offset..offset + 4];
                color::compose_rgba(p[0], p[1], p[2], p[3])
            }
        }
    }

    #[inline]
    fn write(&mut self, offset: usize, val: u32) {
        match self.depth {
            PixelDepth::Bit8 => self.data[offset] = val.min(255) as u8,
            PixelDepth::Bit32 => {
                let (r, g, b, a) = color::extract_rgba(val);
                self.data[offset..offset + 4].copy_from_slice(&[r, g, b, a]);
            }
        }
    }

    #[inline]
    fn offset_or_panic(&self, x: i32, y: i32) -> usize {
        self.offset(x, y).unwrap_or_else(|| {
            panic!(
                "pixel ({}, {}) outside bounds {:?}",
                x, y, self.bounds
            )
        })
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        let offset = self.inner.offset(x, y)?;
        Some(self.inner.read(offset))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the bounds.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: i32, y: i32) -> u32 {
        let offset = self.inner.offset_or_panic(x, y);
        self.inner.read(offset)
    }

    /// Get RGBA values at (x, y).
    ///
    /// 8-bit pixels are reported as opaque gray.
    pub fn get_rgba(&self, x: i32, y: i32) -> Option<(u8, u8, u8, u8)> {
        let val = self.get_pixel(x, y)?;
        Some(match self.inner.depth {
            PixelDepth::Bit8 => (val as u8, val as u8, val as u8, 255),
            PixelDepth::Bit32 => color::extract_rgba(val),
        })
    }

    /// Check whether the pixel at (x, y) is set (non-zero).
    ///
    /// Positions outside the bounds count as unset.
    #[inline]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.get_pixel(x, y).is_some_and(|v| v != 0)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        let offset = self.inner.offset(x, y)?;
        Some(self.inner.read(offset))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the bounds.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: i32, y: i32) -> u32 {
        let offset = self.inner.offset_or_panic(x, y);
        self.inner.read(offset)
    }

    /// Set a pixel value at (x, y).
    ///
    /// 8-bit values are clamped to 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, val: u32) -> Result<()> {
        let offset = self
            .inner
            .offset(x, y)
            .ok_or(Error::PointOutOfBounds { x, y })?;
        self.inner.write(offset, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the bounds.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: i32, y: i32, val: u32) {
        let offset = self.inner.offset_or_panic(x, y);
        self.inner.write(offset, val);
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 8-bit images and
    /// [`Error::PointOutOfBounds`] outside the bounds.
    pub fn set_rgba(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if self.inner.depth != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.inner.depth.bits()));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}
