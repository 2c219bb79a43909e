//! Point grid alignment
//!
//! Moves every point of a dense 2D cloud onto its own slot of a checkerboard grid,
//! so a scatterplot stops overplotting while keeping its overall shape.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────────────────┐
//! │ compute_     │ -> │ build_mesh   │ -> │ Assigner                     │
//! │ bounds       │    │ (h x w, 2x2  │    │  shuffle order               │
//! │ (+ padding)  │    │  checker)    │    │  per point: find_slot,       │
//! └──────────────┘    └──────────────┘    │  double radius on a miss     │
//!                                         │  mark slot Filled            │
//!                                         └──────────────────────────────┘
//! ```
//!
//! The grid is square with side `ceil(sqrt(n / fill))`. Only cells with odd
//! `row + col` are assignable, so neighbouring points never sit on edge-adjacent
//! cells.
//!
//! # Usage
//!
//! ```ignore
//! use pointgrid::{AlignOptions, Point, align_points_to_grid};
//!
//! let cloud = vec![Point::new(0.0, 0.0), Point::new(0.01, 0.0), Point::new(1.0, 1.0)];
//! let aligned = align_points_to_grid(&cloud, &AlignOptions::default().with_seed(7))?;
//! assert_eq!(aligned.len(), cloud.len());
//! ```

mod assign;
mod bounds;
mod error;
mod mesh;
mod point;
mod progress;
mod search;

pub use assign::{AlignOptions, Assigner, align_points_to_grid};
pub use bounds::{Bounds, compute_bounds};
pub use error::{AlignError, AlignResult};
pub use mesh::{Cell, Grid, MAX_CELLS, Slot, build_mesh, grid_size};
pub use point::{Point, displacement};
pub use progress::{NoProgress, Progress};
pub use search::{SearchMode, find_slot};
