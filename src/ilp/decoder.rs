//! Solution decoding: solver assignment back onto a grid

use super::variables::VariableIndexMap;
use crate::error::{GolError, Result};
use crate::game_of_life::Grid;

/// Values above this threshold read as alive, tolerating near-binary output.
pub const ALIVE_THRESHOLD: f64 = 0.5;

/// Decode the cell variables of `assignment` into a `height x width` grid.
///
/// Entries past `height * width` (the slack variables) are ignored.
pub fn decode(assignment: &[f64], height: usize, width: usize) -> Result<Grid> {
    decode_with(assignment, &VariableIndexMap::new(height, width))
}

/// Decode using the index map the program was encoded with
pub fn decode_with(assignment: &[f64], index_map: &VariableIndexMap) -> Result<Grid> {
    let expected = index_map.num_cells();
    if assignment.len() < expected {
        return Err(GolError::Decode {
            expected,
            actual: assignment.len(),
        });
    }

    let (height, width) = index_map.dimensions();
    Grid::from_fn(height, width, |row, col| {
        let k = row * width + col;
        debug_assert_eq!(index_map.coordinates(k), (row, col));
        assignment[k] > ALIVE_THRESHOLD
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uses_row_major_indexing() {
        let (h, w) = (3, 4);
        let assignment: Vec<f64> = (0..h * w).map(|k| if k % 5 == 0 { 1.0 } else { 0.0 }).collect();
        let grid = decode(&assignment, h, w).unwrap();

        let map = VariableIndexMap::new(h, w);
        for i in 0..h {
            for j in 0..w {
                assert_eq!(grid.get(i, j), assignment[i * w + j] > 0.5);
                assert_eq!(map.cell_variable(i, j).unwrap(), i * w + j);
            }
        }
    }

    #[test]
    fn test_decode_tolerates_near_binary_values() {
        let mut assignment = vec![0.0; 9];
        assignment[0] = 0.9999;
        assignment[4] = 1.0000001;
        assignment[8] = 0.0001;
        assignment[7] = 0.5;
        let grid = decode(&assignment, 3, 3).unwrap();
        assert_eq!(grid.living_cells(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_decode_ignores_slack_variables() {
        let mut assignment = vec![0.0; 18];
        for v in assignment.iter_mut().skip(9) {
            *v = 1.0;
        }
        assert!(decode(&assignment, 3, 3).unwrap().is_empty());
    }

    #[test]
    fn test_short_assignment_is_rejected() {
        let err = decode(&[1.0; 8], 3, 3).unwrap_err();
        assert!(matches!(err, GolError::Decode { expected: 9, actual: 8 }));
    }
}
