//! Game of Life transition rule

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Evolve the grid one generation forward.
    ///
    /// Every cell of the grid is computed, edges included; the input is left
    /// untouched.
    pub fn step(current: &Grid) -> Grid {
        let width = current.width();
        let cells: Vec<bool> = (0..current.cell_count())
            .into_par_iter()
            .map(|k| {
                let (row, col) = (k / width, k % width);
                Self::should_be_alive(current.get(row, col), current.count_neighbors(row, col))
            })
            .collect();

        current.with_cells(cells)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(grid: &Grid, generations: usize) -> Grid {
        let mut current = grid.clone();
        for _ in 0..generations {
            current = Self::step(&current);
        }
        current
    }

    /// Every state from `grid` through `generations` steps, inclusive
    pub fn evolution_path(grid: &Grid, generations: usize) -> Vec<Grid> {
        let mut path = Vec::with_capacity(generations + 1);
        path.push(grid.clone());
        for _ in 0..generations {
            let next = Self::step(path.last().unwrap_or(grid));
            path.push(next);
        }
        path
    }

    /// Next state of a cell given its current state and live neighbour count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        match neighbor_count {
            2 => current_state,
            3 => true,
            _ => false,
        }
    }

    /// Whether one step from `predecessor` yields exactly `target`
    pub fn is_predecessor(predecessor: &Grid, target: &Grid) -> bool {
        predecessor.same_shape(target) && Self::step(predecessor) == *target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_cells(
            rows.iter()
                .map(|r| r.chars().map(|c| c == '1').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_still_life_block() {
        let block = grid(&["0000", "0110", "0110", "0000"]);
        assert_eq!(GameOfLifeRules::step(&block), block);
    }

    #[test]
    fn test_oscillator_blinker() {
        let horizontal = grid(&["00000", "00000", "01110", "00000", "00000"]);
        let vertical = grid(&["00000", "00100", "00100", "00100", "00000"]);

        assert_eq!(GameOfLifeRules::step(&horizontal), vertical);
        assert_eq!(GameOfLifeRules::evolve_generations(&horizontal, 2), horizontal);
    }

    #[test]
    fn test_last_row_and_column_are_evolved() {
        // Blinker lying on the last row, wrapping vertically onto row 0
        let target = grid(&["00010", "00000", "00000", "00010", "00010"]);
        let source = grid(&["00000", "00000", "00000", "00000", "00111"]);
        assert_eq!(GameOfLifeRules::step(&source), target);

        // Blinker in the last column
        let source = grid(&["00000", "00001", "00001", "00001", "00000"]);
        let stepped = GameOfLifeRules::step(&source);
        assert!(stepped.get(2, 3));
        assert!(stepped.get(2, 4));
        assert!(stepped.get(2, 0));
        assert_eq!(stepped.living_count(), 3);
    }

    #[test]
    fn test_rule_table_on_fixed_grid() {
        // Centre (2, 2) of a 5x5 grid; neighbours filled in a fixed order
        let ring = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)];

        for s in 0..=8usize {
            for centre in [false, true] {
                let mut g = Grid::new(5, 5).unwrap();
                for &(r, c) in &ring[..s] {
                    g = g.with_cell(r, c, true).unwrap();
                }
                g = g.with_cell(2, 2, centre).unwrap();
                assert_eq!(g.count_neighbors(2, 2) as usize, s);

                let expected = s == 3 || (s == 2 && centre);
                assert_eq!(
                    GameOfLifeRules::step(&g).get(2, 2),
                    expected,
                    "s={} centre={}",
                    s,
                    centre
                );
                assert_eq!(GameOfLifeRules::should_be_alive(centre, s as u8), expected);
            }
        }
    }

    #[test]
    fn test_isolated_cell_dies() {
        let g = Grid::new(5, 5).unwrap().with_cell(2, 2, true).unwrap();
        let next = GameOfLifeRules::step(&g);
        assert!(next.is_empty());
        assert!(g.get(2, 2), "input grid must not change");
    }

    #[test]
    fn test_evolution_path_and_predecessor_check() {
        let horizontal = grid(&["00000", "00000", "01110", "00000", "00000"]);
        let path = GameOfLifeRules::evolution_path(&horizontal, 2);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], path[2]);
        assert!(GameOfLifeRules::is_predecessor(&path[0], &path[1]));
        assert!(!GameOfLifeRules::is_predecessor(&path[0], &path[0]));
    }
}
