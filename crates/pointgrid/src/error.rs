//! Alignment error types.

use thiserror::Error;

use crate::{Bounds, Point};

/// Alignment error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    /// A tuning parameter is outside its accepted range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The point set cannot be aligned (empty, non-finite, degenerate).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A point lies outside the alignment domain.
    #[error("point ({}, {}) is outside bounds {bounds}", .point.x, .point.y)]
    OutOfBounds { point: Point, bounds: Bounds },

    /// The grid ran out of free slots.
    #[error("grid exhausted: {free} free slot(s) for {needed} point(s)")]
    GridExhausted { free: usize, needed: usize },
}

/// Result type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;
