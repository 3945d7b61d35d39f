//! Named morphological compositions
//!
//! [`MorphOp`] selects one of the compositions a caller may run on a mask.
//! Operations parse from their names, so they can come straight from a
//! command line:
//!
//! ```
//! use spritemask_morph::MorphOp;
//!
//! let op: MorphOp = "close-inverse".parse().unwrap();
//! assert_eq!(op, MorphOp::CloseInverse);
//! assert_eq!(op.to_string(), "close-inverse");
//! ```

use crate::binary::{cleanup, close, close_inverse, open, open_inverse};
use crate::{MorphError, MorphResult, Sel};
use spritemask_core::Pix;
use std::fmt;
use std::str::FromStr;

/// A morphological composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphOp {
    /// Opening (erosion followed by dilation)
    Open,
    /// Closing (dilation followed by erosion)
    Close,
    /// Opening of the background
    OpenInverse,
    /// Closing of the background
    CloseInverse,
    /// `close(open(close))`
    #[default]
    Cleanup,
}

impl MorphOp {
    /// All operations, in declaration order
    pub const ALL: [MorphOp; 5] = [
        MorphOp::Open,
        MorphOp::Close,
        MorphOp::OpenInverse,
        MorphOp::CloseInverse,
        MorphOp::Cleanup,
    ];

    /// Name used for parsing and display
    pub fn name(self) -> &'static str {
        match self {
            MorphOp::Open => "open",
            MorphOp::Close => "close",
            MorphOp::OpenInverse => "open-inverse",
            MorphOp::CloseInverse => "close-inverse",
            MorphOp::Cleanup => "cleanup",
        }
    }

    /// Run the operation on a binary image
    pub fn apply(self, pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
        match self {
            MorphOp::Open => open(pix, sel),
            MorphOp::Close => close(pix, sel),
            MorphOp::OpenInverse => open_inverse(pix, sel),
            MorphOp::CloseInverse => close_inverse(pix, sel),
            MorphOp::Cleanup => cleanup(pix, sel),
        }
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MorphOp {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        MorphOp::ALL
            .into_iter()
            .find(|op| op.name() == key)
            .ok_or_else(|| {
                MorphError::InvalidParameters(format!(
                    "unknown operation '{s}' (expected one of open, close, open-inverse, \
                     close-inverse, cleanup)"
                ))
            })
    }
}
