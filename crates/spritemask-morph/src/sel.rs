//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element is a small 8-bit mask image plus an anchor. Every
//! set mask pixel contributes one hit offset `(x - cx, y - cy)`; the
//! morphology in [`crate::binary`] works purely on those offsets.

use crate::{MorphError, MorphResult};
use spritemask_core::{Box, Pix, PixMut, PixelDepth, generate_ellipse_outline};
use spritemask_region::{ConnectivityType, floodfill};

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation and is
/// given in the mask's own coordinates.
#[derive(Debug, Clone)]
pub struct Sel {
    mask: Pix,
    cx: i32,
    cy: i32,
    hits: Vec<(i32, i32)>,
}

impl Sel {
    /// Create a structuring element from a mask and its anchor
    ///
    /// # Arguments
    ///
    /// * `mask` - 8-bit mask; non-zero pixels are hits
    /// * `center` - Anchor position inside the mask bounds
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::UnsupportedDepth`] for a non 8-bit mask and
    /// [`MorphError::InvalidSel`] if the anchor lies outside the mask or
    /// the mask has no set pixel.
    pub fn new(mask: Pix, center: (i32, i32)) -> MorphResult<Self> {
        if mask.depth() != PixelDepth::Bit8 {
            return Err(MorphError::UnsupportedDepth {
                expected: "8-bit",
                actual: mask.depth().bits(),
            });
        }
        let (cx, cy) = center;
        let b = mask.bounds();
        if !b.contains_point(cx, cy) {
            return Err(MorphError::InvalidSel(format!(
                "anchor ({cx}, {cy}) outside mask {b:?}"
            )));
        }

        let mut hits = Vec::new();
        for y in b.y..b.bottom() {
            for x in b.x..b.right() {
                if mask.is_set(x, y) {
                    hits.push((x - cx, y - cy));
                }
            }
        }
        if hits.is_empty() {
            return Err(MorphError::InvalidSel("mask has no set pixel".into()));
        }

        Ok(Self { mask, cx, cy, hits })
    }

    /// Create a disk structuring element
    ///
    /// The ellipse outline inscribed in a `diameter` x `diameter` box is
    /// rasterized and its interior flood filled (4-connected) from the
    /// anchor `(diameter / 2, diameter / 2)`. For even diameters the anchor
    /// sits right of and below the geometric center.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if `diameter` is 0 or too large
    /// for the coordinate range.
    ///
    /// # Example
    ///
    /// ```
    /// use spritemask_morph::Sel;
    ///
    /// let sel = Sel::create_disk(3).unwrap();
    /// assert_eq!(sel.hit_count(), 5);
    /// assert_eq!((sel.origin_x(), sel.origin_y()), (1, 1));
    /// ```
    pub fn create_disk(diameter: u32) -> MorphResult<Self> {
        if diameter == 0 {
            return Err(MorphError::InvalidSel(
                "disk diameter must be at least 1".into(),
            ));
        }
        let d = i32::try_from(diameter)
            .map_err(|_| MorphError::InvalidSel(format!("disk diameter {diameter} too large")))?;
        let center = d / 2;

        let mut mask = PixMut::new_in(Box::from_size(d, d), PixelDepth::Bit8);
        mask.render_pta(&generate_ellipse_outline(0, 0, d, d), 255)?;
        floodfill(&mut mask, center, center, 255, ConnectivityType::FourWay)?;

        Self::new(mask.into(), (center, center))
    }

    /// Get the mask image
    pub fn mask(&self) -> &Pix {
        &self.mask
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> i32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> i32 {
        self.cy
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Hit positions relative to the origin, in raster order
    pub fn hit_offsets(&self) -> &[(i32, i32)] {
        &self.hits
    }

    /// Extent of the mask around its anchor as `(left, top, right, bottom)`
    ///
    /// Dilation grows an image by these margins and erosion shrinks it by
    /// them. Computed from the mask bounds, not from the set pixels.
    pub fn padding(&self) -> (i32, i32, i32, i32) {
        let b = self.mask.bounds();
        (
            self.cx - b.x,
            self.cy - b.y,
            b.right() - self.cx - 1,
            b.bottom() - self.cy - 1,
        )
    }
}
