//! Connected component analysis
//!
//! Components are found by breadth-first search over an 8-bit image,
//! where any non-zero pixel is foreground. Either foreground or
//! background components can be collected, which is how mask cleanup
//! results are checked for stray specks and holes.

use crate::error::{RegionError, RegionResult};
use spritemask_core::{Box, Pix, PixelDepth};
use std::collections::VecDeque;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

const FOUR_WAY: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const EIGHT_WAY: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

impl ConnectivityType {
    /// Neighbor offsets for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }
}

/// A connected component in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label in discovery order, starting at 1
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

/// Find connected components of an 8-bit image
///
/// # Arguments
///
/// * `pix` - Input 8-bit image; non-zero pixels are foreground
/// * `foreground` - Collect foreground components if `true`, background
///   components otherwise
/// * `connectivity` - Connectivity type
///
/// Components are returned in raster order of their first pixel.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] unless the image is 8-bit.
pub fn find_connected_components(
    pix: &Pix,
    foreground: bool,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: pix.depth().bits(),
        });
    }

    let b = pix.bounds();
    let width = b.w.max(0) as usize;
    let index = |x: i32, y: i32| (y - b.y) as usize * width + (x - b.x) as usize;
    let wanted = |x: i32, y: i32| pix.is_set(x, y) == foreground;

    let mut visited = vec![false; b.area() as usize];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for y in b.y..b.bottom() {
        for x in b.x..b.right() {
            if visited[index(x, y)] || !wanted(x, y) {
                continue;
            }

            visited[index(x, y)] = true;
            queue.push_back((x, y));
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            let mut pixel_count = 0u32;

            while let Some((cx, cy)) = queue.pop_front() {
                pixel_count += 1;
                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);

                for &(dx, dy) in connectivity.offsets() {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if b.contains_point(nx, ny) && !visited[index(nx, ny)] && wanted(nx, ny) {
                        visited[index(nx, ny)] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            components.push(ConnectedComponent {
                label: components.len() as u32 + 1,
                pixel_count,
                bounds: Box::new_unchecked(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1),
            });
        }
    }

    Ok(components)
}

/// Count connected components of an 8-bit image
///
/// See [`find_connected_components`] for the meaning of the arguments.
pub fn count_components(
    pix: &Pix,
    foreground: bool,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    Ok(find_connected_components(pix, foreground, connectivity)?.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritemask_core::PixMut;

    fn diagonal_pair() -> Pix {
        let mut m = PixMut::new_in(Box::new_unchecked(-2, -2, 4, 4), PixelDepth::Bit8);
        m.set_pixel(-2, -2, 255).unwrap();
        m.set_pixel(-1, -1, 255).unwrap();
        m.set_pixel(1, 1, 255).unwrap();
        m.into()
    }

    #[test]
    fn test_four_way_vs_eight_way() {
        let pix = diagonal_pair();
        assert_eq!(count_components(&pix, true, ConnectivityType::FourWay).unwrap(), 3);
        assert_eq!(count_components(&pix, true, ConnectivityType::EightWay).unwrap(), 2);
    }

    #[test]
    fn test_component_bounds() {
        let pix = diagonal_pair();
        let comps = find_connected_components(&pix, true, ConnectivityType::EightWay).unwrap();
        assert_eq!(comps[0].label, 1);
        assert_eq!(comps[0].pixel_count, 2);
        assert_eq!(comps[0].bounds, Box::new_unchecked(-2, -2, 2, 2));
        assert_eq!(comps[1].bounds, Box::new_unchecked(1, 1, 1, 1));
    }

    #[test]
    fn test_background_components() {
        // a closed ring splits the background in two
        let mut m = PixMut::new_in(Box::from_size(5, 5), PixelDepth::Bit8);
        for i in 1..4 {
            for (x, y) in [(i, 1), (i, 3), (1, i), (3, i)] {
                m.set_pixel(x, y, 255).unwrap();
            }
        }
        let pix: Pix = m.into();
        assert_eq!(count_components(&pix, false, ConnectivityType::FourWay).unwrap(), 2);
        assert_eq!(count_components(&pix, true, ConnectivityType::FourWay).unwrap(), 1);
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(count_components(&pix, true, ConnectivityType::FourWay).is_err());
    }
}
