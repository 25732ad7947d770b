//! Variable index map between grid cells and program variables

use crate::error::{GolError, Result};

/// Kinds of variables used in the encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Predecessor state of the cell at `(row, col)`
    Cell { row: usize, col: usize },
    /// Indicator linearising the dead-target case of the cell at `(row, col)`
    Slack { row: usize, col: usize },
}

/// Row-major bijection `(row, col) <-> k`, with the slack of cell `k` at `k + cells`.
///
/// Built once per encode/decode cycle; the encoder and the decoder must use
/// maps of the same dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableIndexMap {
    height: usize,
    width: usize,
}

impl VariableIndexMap {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of grid cells, which is also the number of cell variables
    pub fn num_cells(&self) -> usize {
        self.height * self.width
    }

    /// Cell variables followed by one slack variable per cell
    pub fn num_variables(&self) -> usize {
        2 * self.num_cells()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Variable holding the predecessor state of `(row, col)`
    #[inline]
    pub fn cell_variable(&self, row: usize, col: usize) -> Result<usize> {
        self.check_bounds(row, col)?;
        Ok(row * self.width + col)
    }

    /// Slack variable paired with `(row, col)`
    #[inline]
    pub fn slack_variable(&self, row: usize, col: usize) -> Result<usize> {
        Ok(self.cell_variable(row, col)? + self.num_cells())
    }

    /// Grid coordinates of cell variable `k`
    #[inline]
    pub fn coordinates(&self, k: usize) -> (usize, usize) {
        (k / self.width, k % self.width)
    }

    /// What a variable index stands for
    pub fn kind(&self, var: usize) -> Option<VariableKind> {
        let cells = self.num_cells();
        if var < cells {
            let (row, col) = self.coordinates(var);
            Some(VariableKind::Cell { row, col })
        } else if var < 2 * cells {
            let (row, col) = self.coordinates(var - cells);
            Some(VariableKind::Slack { row, col })
        } else {
            None
        }
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(GolError::InvalidGrid(format!(
                "cell ({}, {}) out of bounds for {}x{} grid",
                row, col, self.height, self.width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_indexing() {
        let map = VariableIndexMap::new(3, 4);
        assert_eq!(map.num_cells(), 12);
        assert_eq!(map.num_variables(), 24);

        assert_eq!(map.cell_variable(0, 0).unwrap(), 0);
        assert_eq!(map.cell_variable(1, 2).unwrap(), 6);
        assert_eq!(map.cell_variable(2, 3).unwrap(), 11);
        assert_eq!(map.slack_variable(1, 2).unwrap(), 18);
    }

    #[test]
    fn test_bijection() {
        let map = VariableIndexMap::new(4, 5);
        for k in 0..map.num_cells() {
            let (row, col) = map.coordinates(k);
            assert_eq!(map.cell_variable(row, col).unwrap(), k);
            assert_eq!(map.kind(k), Some(VariableKind::Cell { row, col }));
            assert_eq!(map.kind(k + 20), Some(VariableKind::Slack { row, col }));
        }
        assert_eq!(map.kind(40), None);
    }

    #[test]
    fn test_variable_bounds() {
        let map = VariableIndexMap::new(3, 3);
        assert!(map.cell_variable(3, 0).is_err());
        assert!(map.cell_variable(0, 3).is_err());
        assert!(map.slack_variable(3, 3).is_err());
    }
}
