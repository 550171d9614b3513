//! The static height-field grid.

use serde::{Deserialize, Serialize};

use armada_core::math::{fx, Fx};

/// One cell of the terrain grid.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// Terrain height at this cell.
    pub height: i32,
    /// Set when the cell changed and an external consumer (the terrain
    /// mesh) has not yet picked the change up. Ignored by the
    /// simulation itself.
    pub dirty: bool,
}

/// The height field the simulation runs on.
///
/// Holds the integer terrain height for every grid cell. Out-of-bounds
/// access is a precondition violation: body positions are clamped to
/// the map each tick precisely so lookups stay inside the grid, and a
/// failed assertion here means that invariant broke upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeightGrid {
    size_x: usize,
    size_y: usize,
    points: Vec<GridPoint>,
}

impl HeightGrid {
    /// A flat grid of zero-height cells.
    pub fn flat(size_x: usize, size_y: usize) -> Self {
        assert!(size_x > 1 && size_y > 1, "degenerate map size");
        Self {
            size_x,
            size_y,
            points: vec![GridPoint::default(); size_x * size_y],
        }
    }

    /// Build a grid from row-major heights, `heights[y * size_x + x]`.
    pub fn from_heights(size_x: usize, size_y: usize, heights: &[i32]) -> Self {
        assert_eq!(heights.len(), size_x * size_y);
        let mut grid = Self::flat(size_x, size_y);
        for (point, &height) in grid.points.iter_mut().zip(heights) {
            point.height = height;
        }
        grid
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    pub fn is_point(&self, x: usize, y: usize) -> bool {
        x < self.size_x && y < self.size_y
    }

    pub fn point(&self, x: usize, y: usize) -> &GridPoint {
        assert!(x < self.size_x);
        assert!(y < self.size_y);
        &self.points[y * self.size_x + x]
    }

    pub fn point_mut(&mut self, x: usize, y: usize) -> &mut GridPoint {
        assert!(x < self.size_x);
        assert!(y < self.size_y);
        &mut self.points[y * self.size_x + x]
    }

    /// Terrain height lookup.
    pub fn height(&self, x: usize, y: usize) -> i32 {
        self.point(x, y).height
    }

    /// Terrain height as a fixed-point value, for the physics step.
    pub fn height_fx(&self, x: usize, y: usize) -> Fx {
        fx(self.height(x, y))
    }

    /// Flag one cell for external consumers.
    pub fn mark_dirty(&mut self, x: usize, y: usize) {
        self.point_mut(x, y).dirty = true;
    }

    /// Clear and return the dirty flag of one cell.
    pub fn take_dirty(&mut self, x: usize, y: usize) -> bool {
        let point = self.point_mut(x, y);
        std::mem::replace(&mut point.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_grid() -> HeightGrid {
        // 4×3 grid with a ridge along x=2.
        #[rustfmt::skip]
        let heights = [
            0, 0, 5, 0,
            0, 1, 5, 0,
            0, 0, 5, 0,
        ];
        HeightGrid::from_heights(4, 3, &heights)
    }

    #[test]
    fn test_height_lookup() {
        let grid = make_test_grid();
        assert_eq!(grid.height(0, 0), 0);
        assert_eq!(grid.height(1, 1), 1);
        assert_eq!(grid.height(2, 2), 5);
        assert_eq!(grid.height_fx(2, 0), Fx::from_num(5));
    }

    #[test]
    fn test_is_point() {
        let grid = make_test_grid();
        assert!(grid.is_point(0, 0));
        assert!(grid.is_point(3, 2));
        assert!(!grid.is_point(4, 0));
        assert!(!grid.is_point(0, 3));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_is_fatal() {
        make_test_grid().point(4, 0);
    }

    #[test]
    fn test_dirty_flags() {
        let mut grid = make_test_grid();
        assert!(!grid.take_dirty(1, 1));
        grid.mark_dirty(1, 1);
        assert!(grid.take_dirty(1, 1));
        assert!(!grid.take_dirty(1, 1), "take must clear the flag");
    }
}
