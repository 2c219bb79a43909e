//! Checkerboard grid of candidate slots.

use crate::{AlignError, AlignResult, Bounds, Point};

/// Occupancy of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Slot {
    /// Parity cell, never assignable.
    Blocked = 0,
    /// Open for assignment.
    Free = 1,
    /// Holds a point.
    Filled = 2,
}

/// Row/column address of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Cell at `row`, `col`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A `rows x cols` mesh of slots addressed by ascending tick coordinates.
///
/// Rows follow `y_ticks`, columns follow `x_ticks`. Slots are stored row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    y_ticks: Vec<f64>,
    x_ticks: Vec<f64>,
    slots: Vec<Slot>,
    free: usize,
}

impl Grid {
    /// Initial occupancy of `(row, col)`.
    ///
    /// Tiles `[[Blocked, Free], [Free, Blocked]]`, so the pattern is:
    /// ```text
    ///   0 1 2 3
    /// 0 . o . o
    /// 1 o . o .
    /// 2 . o . o
    /// ```
    #[must_use]
    const fn parity(row: usize, col: usize) -> Slot {
        if (row + col) % 2 == 1 {
            Slot::Free
        } else {
            Slot::Blocked
        }
    }

    fn new(y_ticks: Vec<f64>, x_ticks: Vec<f64>) -> Self {
        let (rows, cols) = (y_ticks.len(), x_ticks.len());
        let mut slots = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                slots.push(Self::parity(row, col));
            }
        }
        let free = slots.iter().filter(|s| **s == Slot::Free).count();

        Self {
            y_ticks,
            x_ticks,
            slots,
            free,
        }
    }

    /// Number of rows (`y_ticks().len()`).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.y_ticks.len()
    }

    /// Number of columns (`x_ticks().len()`).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.x_ticks.len()
    }

    /// Ascending row coordinates.
    #[must_use]
    pub fn y_ticks(&self) -> &[f64] {
        &self.y_ticks
    }

    /// Ascending column coordinates.
    #[must_use]
    pub fn x_ticks(&self) -> &[f64] {
        &self.x_ticks
    }

    /// Whether every row and every column sits on its own coordinate.
    ///
    /// Fails when an axis is too narrow for its magnitude and ticks round together.
    #[must_use]
    pub fn has_distinct_ticks(&self) -> bool {
        let ascending = |t: &[f64]| t.windows(2).all(|w| w[0] < w[1]);
        ascending(&self.y_ticks) && ascending(&self.x_ticks)
    }

    /// Slot state at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn slot(&self, cell: Cell) -> Option<Slot> {
        if cell.row < self.rows() && cell.col < self.cols() {
            Some(self.slots[cell.row * self.cols() + cell.col])
        } else {
            None
        }
    }

    /// Coordinates of `cell`'s tick intersection.
    #[must_use]
    pub fn position(&self, cell: Cell) -> Point {
        Point::new(self.x_ticks[cell.col], self.y_ticks[cell.row])
    }

    /// Number of cells still open.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free
    }

    /// Number of cells already assigned.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| **s == Slot::Filled).count()
    }

    /// Mark a free cell as filled.
    ///
    /// Returns `false` (and changes nothing) if `cell` is blocked, filled, or outside
    /// the grid.
    pub fn fill(&mut self, cell: Cell) -> bool {
        if self.slot(cell) != Some(Slot::Free) {
            return false;
        }
        let cols = self.cols();
        self.slots[cell.row * cols + cell.col] = Slot::Filled;
        self.free -= 1;
        true
    }

    /// Iterate every slot of one row.
    pub(crate) fn row_slots(&self, row: usize) -> &[Slot] {
        let cols = self.cols();
        &self.slots[row * cols..(row + 1) * cols]
    }
}

/// Largest grid that will be allocated.
pub const MAX_CELLS: usize = 1 << 28;

/// Side length of the square grid for `n` points at target occupancy `fill`.
///
/// `ceil(sqrt(n / fill))`, with `fill` in `(0, 1]`.
pub fn grid_size(n: usize, fill: f64) -> AlignResult<usize> {
    if !(fill > 0.0 && fill <= 1.0) {
        return Err(AlignError::InvalidParameter {
            name: "fill",
            value: fill,
            reason: "must be in (0, 1]",
        });
    }
    let size = (n as f64 / fill).sqrt().ceil();
    if !(size * size <= MAX_CELLS as f64) {
        return Err(AlignError::InvalidParameter {
            name: "fill",
            value: fill,
            reason: "too small for this many points, grid would exceed MAX_CELLS",
        });
    }
    Ok(size as usize)
}

/// `count` left edges evenly splitting `[min, max)`.
fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = (max - min) / count as f64;
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Build a `h x w` checkerboard grid spanning `bounds`.
pub fn build_mesh(bounds: &Bounds, h: usize, w: usize) -> AlignResult<Grid> {
    if h == 0 || w == 0 {
        return Err(AlignError::InvalidParameter {
            name: if h == 0 { "h" } else { "w" },
            value: 0.0,
            reason: "grid dimensions must be at least 1",
        });
    }
    if h.checked_mul(w).is_none_or(|cells| cells > MAX_CELLS) {
        return Err(AlignError::InvalidParameter {
            name: "h",
            value: h as f64,
            reason: "h * w exceeds MAX_CELLS",
        });
    }

    Ok(Grid::new(
        ticks(bounds.y_min, bounds.y_max, h),
        ticks(bounds.x_min, bounds.x_max, w),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Bounds {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_ticks_are_left_edges() {
        let grid = build_mesh(&Bounds::new(0.0, 4.0, 10.0, 12.0), 4, 2).unwrap();
        assert_eq!(grid.y_ticks(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(grid.x_ticks(), &[10.0, 11.0]);
    }

    #[test]
    fn test_tick_count_matches_request_for_awkward_steps() {
        // 0.1-sized steps accumulate rounding error; counts must stay exact.
        for n in 1..50 {
            let grid = build_mesh(&Bounds::new(0.0, 0.3, -0.7, 0.1), n, n + 1).unwrap();
            assert_eq!(grid.rows(), n);
            assert_eq!(grid.cols(), n + 1);
            assert!(grid.y_ticks().iter().all(|t| *t < 0.3));
            assert!(grid.y_ticks().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_checkerboard_has_no_edge_adjacent_free_cells() {
        let grid = build_mesh(&unit(), 7, 6).unwrap();
        let edge_neighbors = [(0_isize, 1_isize), (1, 0)];

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let here = grid.slot(Cell::new(row, col)).unwrap();
                for &(dr, dc) in &edge_neighbors {
                    let (nr, nc) = (row as isize + dr, col as isize + dc);
                    if let Some(there) = grid.slot(Cell::new(nr as usize, nc as usize)) {
                        assert_ne!(here, there, "({row},{col}) vs ({nr},{nc})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_origin_cell_is_blocked() {
        let grid = build_mesh(&unit(), 2, 2).unwrap();
        assert_eq!(grid.slot(Cell::new(0, 0)), Some(Slot::Blocked));
        assert_eq!(grid.slot(Cell::new(0, 1)), Some(Slot::Free));
        assert_eq!(grid.slot(Cell::new(1, 0)), Some(Slot::Free));
        assert_eq!(grid.slot(Cell::new(1, 1)), Some(Slot::Blocked));
        assert_eq!(grid.slot(Cell::new(2, 0)), None);
    }

    #[test]
    fn test_free_count_for_odd_and_even_shapes() {
        assert_eq!(build_mesh(&unit(), 1, 1).unwrap().free_count(), 0);
        assert_eq!(build_mesh(&unit(), 3, 3).unwrap().free_count(), 4);
        assert_eq!(build_mesh(&unit(), 4, 4).unwrap().free_count(), 8);
        assert_eq!(build_mesh(&unit(), 1, 5).unwrap().free_count(), 2);
    }

    #[test]
    fn test_fill_only_accepts_free_cells() {
        let mut grid = build_mesh(&unit(), 3, 3).unwrap();
        assert!(!grid.fill(Cell::new(0, 0)));
        assert!(grid.fill(Cell::new(0, 1)));
        assert!(!grid.fill(Cell::new(0, 1)));
        assert!(!grid.fill(Cell::new(9, 9)));
        assert_eq!(grid.slot(Cell::new(0, 1)), Some(Slot::Filled));
        assert_eq!(grid.free_count(), 3);
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(
            build_mesh(&unit(), 0, 3),
            Err(AlignError::InvalidParameter { name: "h", .. })
        ));
        assert!(matches!(
            build_mesh(&unit(), 3, 0),
            Err(AlignError::InvalidParameter { name: "w", .. })
        ));
    }

    #[test]
    fn test_grid_size_law() {
        assert_eq!(grid_size(4, 0.5).unwrap(), 3);
        assert_eq!(grid_size(1, 1.0).unwrap(), 1);
        assert_eq!(grid_size(100, 0.1).unwrap(), 32);
        assert_eq!(grid_size(10, 1.0).unwrap(), 4);
    }

    #[test]
    fn test_tiny_fill_is_rejected_before_allocating() {
        for fill in [1e-300, f64::MIN_POSITIVE, 1e-9] {
            assert!(
                matches!(
                    grid_size(2, fill),
                    Err(AlignError::InvalidParameter { name: "fill", .. })
                ),
                "fill {fill} should be rejected"
            );
        }
        // Largest square that still fits.
        assert_eq!(grid_size(1 << 28, 1.0).unwrap(), 1 << 14);
    }

    #[test]
    fn test_oversized_mesh_is_rejected() {
        assert!(matches!(
            build_mesh(&unit(), usize::MAX, 2),
            Err(AlignError::InvalidParameter { name: "h", .. })
        ));
        assert!(build_mesh(&unit(), 1 << 14, 1 << 15).is_err());
    }

    #[test]
    fn test_distinct_ticks() {
        assert!(build_mesh(&unit(), 5, 5).unwrap().has_distinct_ticks());
        assert!(build_mesh(&unit(), 1, 1).unwrap().has_distinct_ticks());

        // ulp at 1e16 is 2.0; a 4-wide axis cannot hold 15 distinct ticks.
        let narrow = Bounds::new(0.0, 1.0, 1e16, 1e16 + 4.0);
        assert!(!build_mesh(&narrow, 15, 15).unwrap().has_distinct_ticks());
        assert!(!build_mesh(&Bounds::new(2.0, 2.0, 0.0, 1.0), 3, 3)
            .unwrap()
            .has_distinct_ticks());
    }

    #[test]
    fn test_grid_size_rejects_bad_fill() {
        for fill in [0.0, -0.5, 1.0001, f64::NAN] {
            assert!(grid_size(10, fill).is_err(), "fill {fill} should be rejected");
        }
    }
}
