//! Seed fill operations
//!
//! Flood fill of 8-bit images, used to turn a rasterized outline into a
//! solid shape.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use log::trace;
use spritemask_core::{Pix, PixMut, PixelDepth};
use std::collections::VecDeque;

/// Options for seed fill operations
#[derive(Debug, Clone)]
pub struct SeedFillOptions {
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
    /// Fill value
    pub fill_value: u8,
}

impl Default for SeedFillOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::FourWay,
            fill_value: 255,
        }
    }
}

impl SeedFillOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }
}

/// Flood fill an 8-bit image starting from a seed point
///
/// Replaces the connected region of pixels sharing the seed's value with
/// `new_value`, in place. Coordinates are absolute. Each pixel is
/// enqueued at most once, so the work is linear in the region size.
///
/// # Arguments
///
/// * `pix` - Mutable 8-bit image
/// * `seed_x` - X coordinate of the seed point
/// * `seed_y` - Y coordinate of the seed point
/// * `new_value` - Value to fill with
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// The number of pixels that were filled. A seed that already holds
/// `new_value` fills nothing.
///
/// # Errors
///
/// Returns an error if the seed position is out of bounds or the image is
/// not 8-bit.
pub fn floodfill(
    pix: &mut PixMut,
    seed_x: i32,
    seed_y: i32,
    new_value: u8,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: pix.depth().bits(),
        });
    }

    let Some(old_value) = pix.get_pixel(seed_x, seed_y) else {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    };
    let new_value = new_value as u32;

    if old_value == new_value {
        return Ok(0);
    }

    let bounds = pix.bounds();
    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();

    // pixels are marked when enqueued
    pix.set_pixel_unchecked(seed_x, seed_y, new_value);
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        filled_count += 1;
        for &(dx, dy) in connectivity.offsets() {
            let (nx, ny) = (x + dx, y + dy);
            if bounds.contains_point(nx, ny) && pix.get_pixel_unchecked(nx, ny) == old_value {
                pix.set_pixel_unchecked(nx, ny, new_value);
                queue.push_back((nx, ny));
            }
        }
    }

    trace!(
        "floodfill from ({}, {}) filled {} pixels",
        seed_x, seed_y, filled_count
    );
    Ok(filled_count)
}

/// Seed fill into a copy of the image
///
/// Creates a new image by flood filling from the seed point in a copy of
/// the input.
pub fn seedfill(
    pix: &Pix,
    seed_x: i32,
    seed_y: i32,
    options: &SeedFillOptions,
) -> RegionResult<Pix> {
    let mut output = pix.to_mut();
    floodfill(
        &mut output,
        seed_x,
        seed_y,
        options.fill_value,
        options.connectivity,
    )?;
    Ok(output.into())
}
