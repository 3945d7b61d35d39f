//! Spritemask Core - Basic data structures for mask extraction
//!
//! This crate provides the fundamental data structures used throughout
//! the spritemask pipeline:
//!
//! - [`Pix`] / [`PixMut`] - The main image container (immutable / mutable)
//! - [`Box`] - Rectangle regions and image bounds
//! - [`Pta`] - Point arrays
//! - [`Histogram`] - 256-bin gray level histogram
//!
//! It also hosts the shape rasterizer ([`generate_ellipse_outline`]),
//! since every other crate builds on its output.

pub mod box_;
pub mod error;
pub mod pix;
pub mod pta;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::graphics::generate_ellipse_outline;
pub use pix::{AlphaMode, Histogram, Pix, PixMut, PixelDepth, RegionMut};
pub use pta::Pta;

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are packed as `0xRRGGBBAA` (red in MSB, alpha in LSB),
/// matching the R, G, B, A byte order in memory.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Widen an 8-bit channel to 16 bits by byte replication.
    ///
    /// 0 maps to 0 and 255 maps to 65535.
    #[inline]
    pub fn widen16(v: u8) -> u32 {
        let v = v as u32;
        v | (v << 8)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract() {
            let p = compose_rgba(0x12, 0x34, 0x56, 0x78);
            assert_eq!(p, 0x1234_5678);
            assert_eq!(extract_rgba(p), (0x12, 0x34, 0x56, 0x78));
            assert_eq!(extract_rgb(p), (0x12, 0x34, 0x56));
        }

        #[test]
        fn test_compose_rgb_is_opaque() {
            assert_eq!(alpha(compose_rgb(1, 2, 3)), 255);
        }

        #[test]
        fn test_widen16() {
            assert_eq!(widen16(0), 0);
            assert_eq!(widen16(255), 0xffff);
            assert_eq!(widen16(0x80), 0x8080);
        }
    }
}
