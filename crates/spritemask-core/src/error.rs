//! Error types for spritemask-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// spritemask-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image or rectangle dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    /// Invalid pixel depth
    #[error("invalid pixel depth: {0} bpp")]
    InvalidDepth(u32),

    /// Unsupported pixel depth for this operation
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// Pixel coordinate outside the image bounds
    #[error("point ({x}, {y}) is outside the image bounds")]
    PointOutOfBounds { x: i32, y: i32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
