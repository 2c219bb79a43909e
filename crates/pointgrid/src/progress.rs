//! Progress notifications during assignment.

/// Receives `(assigned, total)` checkpoints while points are slotted.
pub trait Progress {
    fn report(&mut self, assigned: usize, total: usize);
}

/// Discards every checkpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    #[inline]
    fn report(&mut self, _assigned: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> Progress for F {
    #[inline]
    fn report(&mut self, assigned: usize, total: usize) {
        self(assigned, total);
    }
}
