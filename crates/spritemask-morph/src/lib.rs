//! spritemask-morph - Morphological operations for mask cleanup
//!
//! This crate provides morphological operations including:
//!
//! - Structuring elements (SEL) built from a rasterized, flood-filled disk
//! - Binary morphology: erosion, dilation, opening, closing
//! - Inverse variants that open or close the background instead
//! - The three-stage `close(open(close))` cleanup used on sprite masks
//!
//! # Example
//!
//! ```
//! use spritemask_core::{Pix, PixelDepth};
//! use spritemask_morph::{MorphOp, Sel};
//!
//! let pix = Pix::new(32, 32, PixelDepth::Bit8).unwrap();
//! let sel = Sel::create_disk(5).unwrap();
//! let out = MorphOp::Close.apply(&pix, &sel).unwrap();
//! assert_eq!(out.width(), 28);
//! ```

pub mod binary;
mod error;
pub mod sel;
pub mod sequence;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{
    cleanup, close, close_inverse, dilate, dilate_padded, erode, open, open_inverse,
};
pub use sequence::MorphOp;
