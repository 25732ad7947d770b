//! Random grid initialisation

use super::Grid;
use crate::error::{GolError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Grid whose cells are alive independently with probability 0.5
pub fn random_grid(height: usize, width: usize) -> Result<Grid> {
    random_grid_with(&mut rand::thread_rng(), height, width, 0.5)
}

/// Reproducible random grid from a seed
pub fn seeded_random_grid(height: usize, width: usize, density: f64, seed: u64) -> Result<Grid> {
    random_grid_with(&mut StdRng::seed_from_u64(seed), height, width, density)
}

/// Random grid drawing each cell from `rng` with the given live probability
pub fn random_grid_with<R: Rng + ?Sized>(
    rng: &mut R,
    height: usize,
    width: usize,
    density: f64,
) -> Result<Grid> {
    if !(0.0..=1.0).contains(&density) {
        return Err(GolError::InvalidGrid(format!(
            "live density must lie in [0, 1], got {}",
            density
        )));
    }
    Grid::from_fn(height, width, |_, _| rng.gen_bool(density))
}
