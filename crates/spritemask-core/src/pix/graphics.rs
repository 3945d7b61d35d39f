//! Graphics rendering functions
//!
//! Integer shape rasterization:
//! - Ellipse outlines (midpoint algorithm, mirrored from one quadrant)
//! - Rendering point arrays onto gray images

use super::{PixMut, PixelDepth};
use crate::error::{Error, Result};
use crate::pta::Pta;

// =============================================================================
// Point array generation helpers
// =============================================================================

/// Trace one quadrant of an ellipse with the integer midpoint algorithm.
///
/// The arc starts at the top `(0, b)` and walks clockwise to `(a, 0)`,
/// with `a = (w - 1) / 2` and `b = (h - 1) / 2`. Consecutive points are
/// 8-connected. Returns an empty list when either size is not positive.
fn ellipse_quarter(w: i32, h: i32) -> Vec<(i32, i32)> {
    if w <= 0 || h <= 0 {
        return Vec::new();
    }

    let a = ((w - 1) / 2) as i64;
    let b = ((h - 1) / 2) as i64;
    let (a2, b2) = (a * a, b * b);

    let crit1 = -(a2 / 4 + a % 2 + b2);
    let crit2 = -(b2 / 4 + b % 2 + a2);
    let crit3 = -(b2 / 4 + b % 2);

    let (mut x, mut y) = (0i64, b);
    let mut t = -a2 * y;
    let mut dxt = 2 * b2 * x;
    let mut dyt = -2 * a2 * y;
    let d2xt = 2 * b2;
    let d2yt = 2 * a2;

    let mut points = Vec::new();
    while y >= 0 && x <= a {
        points.push((x as i32, y as i32));

        if t + b2 * x <= crit1 || t + a2 * y <= crit3 {
            // step right
            x += 1;
            dxt += d2xt;
            t += dxt;
        } else if t - a2 * y > crit2 {
            // step down
            y -= 1;
            dyt += d2yt;
            t += dyt;
        } else {
            x += 1;
            dxt += d2xt;
            t += dxt;
            y -= 1;
            dyt += d2yt;
            t += dyt;
        }
    }
    points
}

/// Generate the outline of the ellipse inscribed in a `w` x `h` box.
///
/// One quadrant is traced and mirrored into the other three. For even
/// sizes the mirrored copies are shifted by one pixel so the outline
/// spans exactly `[x, x + w) x [y, y + h)`; for odd sizes the shared
/// axis points are emitted only once. The result is symmetric about
/// both axes of the box and walks the outline in order:
/// bottom-right, top-right, top-left, bottom-left.
///
/// # Arguments
///
/// * `x`, `y` - Top-left corner of the bounding box
/// * `w`, `h` - Bounding box size; a non-positive size gives an empty `Pta`
///
/// # Example
///
/// ```
/// use spritemask_core::generate_ellipse_outline;
///
/// let pta = generate_ellipse_outline(0, 0, 1, 1);
/// assert_eq!(pta.len(), 1);
/// assert_eq!(pta.get(0), Some((0, 0)));
/// ```
pub fn generate_ellipse_outline(x: i32, y: i32, w: i32, h: i32) -> Pta {
    let quarter = ellipse_quarter(w, h);
    if quarter.is_empty() {
        return Pta::new();
    }

    let n = quarter.len() as isize;
    let xp = (w % 2 == 0) as i32;
    let yp = (h % 2 == 0) as i32;
    let dx = x + w / 2;
    let dy = y + h / 2;
    let at = |i: isize| quarter[i as usize];

    let mut pta = Pta::with_capacity(quarter.len() * 4);

    // bottom-right
    for &(qx, qy) in &quarter {
        pta.push(qx + dx, qy + dy);
    }
    // top-right, walked back towards the horizontal axis
    for i in (0..n - 1 + yp as isize).rev() {
        let (qx, qy) = at(i);
        pta.push(qx + dx, -qy - yp + dy);
    }
    // top-left
    for i in (1 - xp as isize)..n {
        let (qx, qy) = at(i);
        pta.push(-qx - xp + dx, -qy - yp + dy);
    }
    // bottom-left
    for i in ((1 - xp as isize)..(n - 1 + yp as isize)).rev() {
        let (qx, qy) = at(i);
        pta.push(-qx - xp + dx, qy + dy);
    }

    pta
}

// =============================================================================
// PixMut rendering implementations
// =============================================================================

impl PixMut {
    /// Render a point array onto an 8-bit image with the value `val`.
    ///
    /// Points outside the image bounds are clipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless the image is 8-bit.
    pub fn render_pta(&mut self, pta: &Pta, val: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let bounds = self.bounds();
        for (x, y) in pta.iter().filter(|&(x, y)| bounds.contains_point(x, y)) {
            self.set_pixel_unchecked(x, y, val as u32);
        }
        Ok(())
    }
}
