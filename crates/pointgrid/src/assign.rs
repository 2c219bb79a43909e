//! Assignment of every point to its own grid slot.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::{debug, info, trace};

use crate::{
    AlignError, AlignResult, Bounds, Cell, Grid, NoProgress, Point, Progress, SearchMode,
    build_mesh, compute_bounds, find_slot, grid_size,
};

/// Tuning knobs for one alignment run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignOptions {
    /// Target fraction of grid slots that end up occupied, in `(0, 1]`.
    pub fill: f64,
    /// Fraction of each axis extent added on both sides of the bounds, in `[0, 1)`.
    pub pad: f64,
    /// Pick the closest free slot in the window instead of the first one.
    pub optimal: bool,
    /// Report progress after every `log_every` assignments.
    pub log_every: Option<usize>,
    /// Seed for the processing order. Random when unset.
    pub seed: Option<u64>,
    /// Fixed alignment domain. Overrides the computed (padded) bounds.
    pub bounds: Option<Bounds>,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            fill: 0.1,
            pad: 0.0,
            optimal: false,
            log_every: None,
            seed: None,
            bounds: None,
        }
    }
}

impl AlignOptions {
    /// Set the target occupancy.
    #[must_use]
    pub fn with_fill(mut self, fill: f64) -> Self {
        self.fill = fill;
        self
    }

    /// Set the bounds padding fraction.
    #[must_use]
    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    /// Choose nearest-slot search over first-free.
    #[must_use]
    pub fn with_optimal(mut self, optimal: bool) -> Self {
        self.optimal = optimal;
        self
    }

    /// Report progress every `every` assignments.
    #[must_use]
    pub fn with_log_every(mut self, every: usize) -> Self {
        self.log_every = Some(every);
        self
    }

    /// Fix the processing order.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Align inside `bounds` instead of the computed box.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Search mode implied by `optimal`.
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        SearchMode::from_optimal(self.optimal)
    }
}

/// Runs the alignment with an injectable random source and progress sink.
///
/// ```ignore
/// let aligned = Assigner::new(AlignOptions::default().with_fill(0.5))
///     .with_rng(ChaCha8Rng::seed_from_u64(7))
///     .with_progress(|done: usize, total: usize| eprintln!("{done}/{total}"))
///     .run(&points)?;
/// ```
pub struct Assigner<R = ChaCha8Rng, P = NoProgress> {
    options: AlignOptions,
    rng: R,
    progress: P,
}

impl Assigner {
    /// Seeded from `options.seed`, or from the thread RNG when unset.
    #[must_use]
    pub fn new(options: AlignOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Self {
            options,
            rng,
            progress: NoProgress,
        }
    }
}

impl<R: Rng, P: Progress> Assigner<R, P> {
    /// Replace the random source that orders the points.
    #[must_use]
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Assigner<R2, P> {
        Assigner {
            options: self.options,
            rng,
            progress: self.progress,
        }
    }

    /// Receive `(assigned, total)` every `log_every` assignments.
    #[must_use]
    pub fn with_progress<P2: Progress>(self, progress: P2) -> Assigner<R, P2> {
        Assigner {
            options: self.options,
            rng: self.rng,
            progress,
        }
    }

    /// Options this run uses.
    #[must_use]
    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Move every point to a distinct free slot, keeping input order.
    #[tracing::instrument(level = "debug", skip_all, fields(points = points.len()))]
    pub fn run(&mut self, points: &[Point]) -> AlignResult<Vec<Point>> {
        let n = points.len();
        let size = grid_size(n, self.options.fill)?;
        let log_every = match self.options.log_every {
            Some(0) => {
                return Err(AlignError::InvalidParameter {
                    name: "log_every",
                    value: 0.0,
                    reason: "must be a positive count",
                });
            }
            other => other,
        };

        let computed = compute_bounds(points, self.options.pad)?;
        let bounds = self.options.bounds.unwrap_or(computed);
        check_domain(&bounds, n)?;

        let mut grid = build_mesh(&bounds, size, size)?;
        if n > 1 && !grid.has_distinct_ticks() {
            return Err(AlignError::InvalidInput(format!(
                "{bounds} is too narrow for {size} distinct ticks per axis"
            )));
        }
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            free = grid.free_count(),
            "created mesh"
        );
        if grid.free_count() < n {
            return Err(AlignError::GridExhausted {
                free: grid.free_count(),
                needed: n,
            });
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);

        debug!("filling mesh");
        let mode = self.options.mode();
        let mut placed = points.to_vec();

        for (done, &index) in order.iter().enumerate() {
            let point = points[index];
            if !bounds.contains(point) {
                return Err(AlignError::OutOfBounds { point, bounds });
            }

            let cell = slot_point(&mut grid, &bounds, point, mode, n - done)?;
            placed[index] = grid.position(cell);

            let assigned = done + 1;
            if let Some(every) = log_every {
                if assigned % every == 0 {
                    info!(assigned, total = n, "slotted points");
                    self.progress.report(assigned, n);
                }
            }
        }

        Ok(placed)
    }
}

/// Reject domains the grid cannot subdivide into distinct slots.
fn check_domain(bounds: &Bounds, n: usize) -> AlignResult<()> {
    let finite = [bounds.y_min, bounds.y_max, bounds.x_min, bounds.x_max]
        .iter()
        .all(|v| v.is_finite());
    if !finite || bounds.height() < 0.0 || bounds.width() < 0.0 {
        return Err(AlignError::InvalidInput(format!("malformed bounds {bounds}")));
    }
    // Every tick on a zero-extent axis shares one coordinate.
    if n > 1 && (bounds.height() == 0.0 || bounds.width() == 0.0) {
        return Err(AlignError::InvalidInput(format!(
            "{n} points span a zero-extent axis in {bounds}"
        )));
    }
    Ok(())
}

/// Search with a doubling radius until a free slot turns up, then claim it.
fn slot_point(
    grid: &mut Grid,
    bounds: &Bounds,
    point: Point,
    mode: SearchMode,
    remaining: usize,
) -> AlignResult<Cell> {
    let mut r_y = bounds.height() / grid.rows() as f64;
    let mut r_x = bounds.width() / grid.cols() as f64;

    loop {
        if let Some(cell) = find_slot(grid, point, r_x, r_y, mode) {
            let claimed = grid.fill(cell);
            debug_assert!(claimed, "search returned a non-free cell {cell:?}");
            return Ok(cell);
        }

        // The window already spans every tick.
        if r_y >= bounds.height() && r_x >= bounds.width() {
            return Err(AlignError::GridExhausted {
                free: grid.free_count(),
                needed: remaining,
            });
        }

        r_y *= 2.0;
        r_x *= 2.0;
        trace!(r_x, r_y, "widening search window");
    }
}

/// Align `points` to a checkerboard grid using `options`.
pub fn align_points_to_grid(points: &[Point], options: &AlignOptions) -> AlignResult<Vec<Point>> {
    Assigner::new(options.clone()).run(points)
}
