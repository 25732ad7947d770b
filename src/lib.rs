//! Conway's Game of Life on a torus, forward and backward
//!
//! Forward simulation applies the B3/S23 rule to every cell of a wrapping
//! grid. Backward inference encodes "which grids step into this one?" as a
//! binary linear program and hands it to the first available solver backend.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod ilp;
pub mod reverse;
pub mod utils;

pub use config::{Settings, SolverConfig};
pub use error::{GolError, Result};
pub use game_of_life::{GameOfLifeRules, Grid};
pub use reverse::{ReverseOutcome, ReverseProblem, Solution};

/// Advance `grid` by one generation
pub fn simulate_step(grid: &Grid) -> Grid {
    GameOfLifeRules::step(grid)
}

/// Find a predecessor of `target` with the default solver configuration
pub fn reverse_step(target: &Grid) -> Result<ReverseOutcome> {
    reverse_step_with(target, &SolverConfig::default())
}

/// Find a predecessor of `target` using `config`'s backends and objective
pub fn reverse_step_with(target: &Grid, config: &SolverConfig) -> Result<ReverseOutcome> {
    ReverseProblem::new(target.clone(), config.clone()).outcome()
}
