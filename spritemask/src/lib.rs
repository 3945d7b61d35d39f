//! spritemask - Binary mask extraction for sprites
//!
//! Turns a color sprite into a clean binary mask:
//!
//! - Grayscale conversion with fixed luma weights
//! - Otsu thresholding
//! - Morphological cleanup with a disk structuring element
//!
//! The [`pipeline`] module chains these stages; the `build-images` binary
//! runs it on a PNG file.
//!
//! # Example
//!
//! ```
//! use spritemask::{Pix, PixelDepth};
//!
//! // Create a new 8-bit grayscale image
//! let pix = Pix::new(64, 48, PixelDepth::Bit8).unwrap();
//! assert_eq!(pix.width(), 64);
//! assert_eq!(pix.height(), 48);
//! ```

pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use spritemask_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use spritemask_color as color;
pub use spritemask_io as io;
pub use spritemask_morph as morph;
pub use spritemask_region as region;

pub use pipeline::{
    MaskPipeline, PipelineConfig, PipelineError, PipelineOutput, PipelineResult,
};
