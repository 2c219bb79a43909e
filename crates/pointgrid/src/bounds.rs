//! Axis-aligned bounding box of a point cloud.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AlignError, AlignResult, Point};

/// Rectangular domain of valid point positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub y_min: f64,
    pub y_max: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Bounds {
    /// Bounds from explicit axis limits.
    #[must_use]
    pub const fn new(y_min: f64, y_max: f64, x_min: f64, x_max: f64) -> Self {
        Self {
            y_min,
            y_max,
            x_min,
            x_max,
        }
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.y >= self.y_min && p.y <= self.y_max && p.x >= self.x_min && p.x <= self.x_max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y [{}, {}] x [{}, {}]",
            self.y_min, self.y_max, self.x_min, self.x_max
        )
    }
}

/// Bounding box of `points`, each axis grown by `pad` times its extent on both ends.
///
/// `pad` must lie in `[0, 1)`.
pub fn compute_bounds(points: &[Point], pad: f64) -> AlignResult<Bounds> {
    if !(0.0..1.0).contains(&pad) {
        return Err(AlignError::InvalidParameter {
            name: "pad",
            value: pad,
            reason: "must be in [0, 1)",
        });
    }

    let Some(first) = points.first() else {
        return Err(AlignError::InvalidInput("no points to bound".into()));
    };

    let mut b = Bounds::new(first.y, first.y, first.x, first.x);
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(AlignError::InvalidInput(format!(
                "point {i} has non-finite coordinates ({}, {})",
                p.x, p.y
            )));
        }
        b.y_min = b.y_min.min(p.y);
        b.y_max = b.y_max.max(p.y);
        b.x_min = b.x_min.min(p.x);
        b.x_max = b.x_max.max(p.x);
    }

    let dy = (b.height() * pad).abs();
    let dx = (b.width() * pad).abs();
    Ok(Bounds::new(b.y_min - dy, b.y_max + dy, b.x_min - dx, b.x_max + dx))
}
