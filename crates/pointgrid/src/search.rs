//! Free-slot lookup inside a rectangular search window.

use std::ops::Range;

use crate::{Cell, Grid, Point, Slot};

/// How a free slot is chosen within the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// First free slot in row-major order. Cheap, approximately close.
    #[default]
    FirstFree,
    /// Closest free slot in the window. Scans the whole window.
    Nearest,
}

impl SearchMode {
    #[must_use]
    pub const fn from_optimal(optimal: bool) -> Self {
        if optimal { Self::Nearest } else { Self::FirstFree }
    }
}

/// Indices of the ticks in `[low, high]`.
fn window(ticks: &[f64], low: f64, high: f64) -> Range<usize> {
    let start = ticks.partition_point(|t| *t < low);
    let end = ticks.partition_point(|t| *t <= high);
    start..end.max(start)
}

/// Find a free slot within `r_x` / `r_y` of `point`.
///
/// `None` means the window holds no free slot; callers widen it and retry.
#[must_use]
pub fn find_slot(grid: &Grid, point: Point, r_x: f64, r_y: f64, mode: SearchMode) -> Option<Cell> {
    let rows = window(grid.y_ticks(), point.y - r_y, point.y + r_y);
    let cols = window(grid.x_ticks(), point.x - r_x, point.x + r_x);

    let mut best: Option<(f64, Cell)> = None;

    for row in rows {
        let slots = &grid.row_slots(row)[cols.clone()];
        for (offset, slot) in slots.iter().enumerate() {
            if *slot != Slot::Free {
                continue;
            }
            let cell = Cell::new(row, cols.start + offset);
            match mode {
                SearchMode::FirstFree => return Some(cell),
                SearchMode::Nearest => {
                    let dist = point.distance(grid.position(cell));
                    if best.is_none_or(|(d, _)| dist < d) {
                        best = Some((dist, cell));
                    }
                }
            }
        }
    }

    best.map(|(_, cell)| cell)
}
