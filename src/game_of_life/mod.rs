//! Game of Life core functionality

pub mod grid;
pub mod io;
pub mod random;
pub mod rules;

pub use grid::{neighbors, Grid};
pub use io::{create_example_grids, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use random::{random_grid, seeded_random_grid};
pub use rules::GameOfLifeRules;
