//! Error types for grid construction, encoding and solving

use thiserror::Error;

/// Smallest extent per axis for which the eight wrapped neighbours are distinct.
pub const MIN_GRID_DIMENSION: usize = 3;

/// Errors surfaced by the simulation and reverse-inference pipeline.
///
/// An infeasible target is not an error: see [`crate::reverse::ReverseOutcome`].
#[derive(Debug, Error)]
pub enum GolError {
    /// Non-rectangular input, zero-sized or too-small dimensions.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Two grids that must share dimensions do not.
    #[error("dimension mismatch: expected {expected_height}x{expected_width}, got {height}x{width}")]
    DimensionMismatch {
        expected_height: usize,
        expected_width: usize,
        height: usize,
        width: usize,
    },

    /// No backend in the selection list could be constructed.
    #[error("no solver backend available (tried: {tried})")]
    SolverUnavailable { tried: String },

    /// The backend failed while solving.
    #[error("solver failure: {0}")]
    Solver(String),

    /// Assignment vector shorter than the grid it should decode into.
    #[error("assignment has {actual} values, expected at least {expected}")]
    Decode { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, GolError>;
