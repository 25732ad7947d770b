//! Grid representation and toroidal neighbourhood lookup

use crate::error::{GolError, Result, MIN_GRID_DIMENSION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets of the Moore neighbourhood, centre excluded.
#[rustfmt::skip]
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// The eight neighbours of `(row, col)` on a `height x width` torus.
pub fn neighbors(row: usize, col: usize, height: usize, width: usize) -> [(usize, usize); 8] {
    let h = height as isize;
    let w = width as isize;
    NEIGHBOR_OFFSETS.map(|(dr, dc)| {
        (
            (row as isize + dr).rem_euclid(h) as usize,
            (col as isize + dc).rem_euclid(w) as usize,
        )
    })
}

/// A fixed-size Game of Life grid, row-major, wrapping at the edges.
///
/// Grids are immutable once built; every constructor validates the
/// dimensions, so a `Grid` value is always at least 3x3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "GridRows", try_from = "GridRows")]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::from_flat(height, width, vec![false; height * width])
    }

    /// Create a grid from rows of cells
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(GolError::InvalidGrid(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        Self::from_flat(height, width, cells.into_iter().flatten().collect())
    }

    /// Create a grid from row-major cell values
    pub fn from_flat(height: usize, width: usize, cells: Vec<bool>) -> Result<Self> {
        check_dimensions(height, width)?;
        if cells.len() != height * width {
            return Err(GolError::InvalidGrid(format!(
                "{} cells supplied for a {}x{} grid",
                cells.len(),
                height,
                width
            )));
        }
        Ok(Self { height, width, cells })
    }

    /// Create a grid by evaluating `f(row, col)` for every cell
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        check_dimensions(height, width)?;
        let cells = (0..height * width).map(|k| f(k / width, k % width)).collect();
        Ok(Self { height, width, cells })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells, `height * width`
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell values
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Convert 2D coordinates to the row-major index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Cell value at coordinates; out-of-range coordinates read as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.height && col < self.width {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    /// Copy of this grid with one cell changed
    pub fn with_cell(&self, row: usize, col: usize, value: bool) -> Result<Self> {
        if row >= self.height || col >= self.width {
            return Err(GolError::InvalidGrid(format!(
                "coordinates ({}, {}) out of bounds for {}x{} grid",
                row, col, self.height, self.width
            )));
        }
        let mut next = self.clone();
        let idx = next.index(row, col);
        next.cells[idx] = value;
        Ok(next)
    }

    /// Grid of the same shape holding `cells`
    pub(crate) fn with_cells(&self, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            height: self.height,
            width: self.width,
            cells,
        }
    }

    /// Wrapped neighbour coordinates of a cell
    pub fn neighbors(&self, row: usize, col: usize) -> [(usize, usize); 8] {
        neighbors(row, col, self.height, self.width)
    }

    /// Count living neighbours for a cell
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        self.neighbors(row, col)
            .iter()
            .filter(|&&(r, c)| self.cells[self.index(r, c)])
            .count() as u8
    }

    /// All living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(k, _)| (k / self.width, k % self.width))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Whether `other` has the same dimensions
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.height == other.height && self.width == other.width
    }
}

fn check_dimensions(height: usize, width: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(GolError::InvalidGrid(format!(
            "grid dimensions must be non-zero, got {}x{}",
            height, width
        )));
    }
    if height < MIN_GRID_DIMENSION || width < MIN_GRID_DIMENSION {
        return Err(GolError::InvalidGrid(format!(
            "grid must be at least {min}x{min}, got {}x{}",
            height,
            width,
            min = MIN_GRID_DIMENSION
        )));
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &cell in row {
                write!(f, "{}", if cell { "⬛" } else { "⬜" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serialized form: one `0`/`1` string per row.
#[derive(Serialize, Deserialize)]
struct GridRows(Vec<String>);

impl From<Grid> for GridRows {
    fn from(grid: Grid) -> Self {
        GridRows(
            grid.cells
                .chunks(grid.width)
                .map(|row| row.iter().map(|&c| if c { '1' } else { '0' }).collect())
                .collect(),
        )
    }
}

impl TryFrom<GridRows> for Grid {
    type Error = GolError;

    fn try_from(rows: GridRows) -> Result<Self> {
        let cells = rows
            .0
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '0' => Ok(false),
                        '1' => Ok(true),
                        other => Err(GolError::InvalidGrid(format!("unexpected cell '{}'", other))),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Grid::from_cells(cells)
    }
}
