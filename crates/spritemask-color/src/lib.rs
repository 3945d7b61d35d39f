//! spritemask-color - Color processing for mask extraction
//!
//! This crate turns color sprites into binary masks:
//!
//! - **Grayscale conversion** ([`grayscale`]): luma with fixed-point weights,
//!   computed over four image quadrants in parallel
//! - **Thresholding** ([`threshold`]): fixed-level binarization and Otsu's method

pub mod error;
pub mod grayscale;
pub mod threshold;

// Re-export core types
pub use spritemask_core;

pub use error::{ColorError, ColorResult};

pub use grayscale::{
    ColorSource, LUMA_B, LUMA_G, LUMA_R, convert_source_to_gray, convert_to_gray, luma16,
    rgb_to_gray,
};

pub use threshold::{otsu_level, threshold_in_place, threshold_otsu, threshold_to_binary};
