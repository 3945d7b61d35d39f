//! spritemask-region - Region processing for spritemask
//!
//! This crate provides region processing functionality including:
//!
//! - **Seed fill operations** - Flood fill of outlines into solid shapes
//! - **Connected component analysis** - Finding and counting connected regions
//!
//! # Examples
//!
//! ## Flood fill
//!
//! ```
//! use spritemask_region::{floodfill, ConnectivityType};
//! use spritemask_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! // Fill from seed point
//! let count = floodfill(&mut pix_mut, 5, 5, 255, ConnectivityType::FourWay).unwrap();
//! assert_eq!(count, 100); // All 100 pixels filled
//! ```
//!
//! ## Counting components
//!
//! ```
//! use spritemask_region::{count_components, ConnectivityType};
//! use spritemask_core::{Pix, PixelDepth};
//!
//! let mut pix_mut = Pix::new(10, 10, PixelDepth::Bit8).unwrap().into_mut();
//! pix_mut.set_pixel(1, 1, 255).unwrap();
//! pix_mut.set_pixel(8, 8, 255).unwrap();
//! let pix: Pix = pix_mut.into();
//!
//! let n = count_components(&pix, true, ConnectivityType::FourWay).unwrap();
//! assert_eq!(n, 2);
//! ```

pub mod conncomp;
mod error;
pub mod seedfill;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, count_components, find_connected_components,
};
pub use error::{RegionError, RegionResult};
pub use seedfill::{SeedFillOptions, floodfill, seedfill};
