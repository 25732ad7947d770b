//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::io::grid_to_string;
use crate::game_of_life::Grid;
use crate::reverse::Solution;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a solution for console output
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("Backend: {} ({})\n", solution.backend, solution.status));
        if let Some(value) = solution.objective_value {
            output.push_str(&format!("Objective: {}\n", value));
        }
        output.push_str(&format!("Solve Time: {:.3}s\n", solution.solve_time.as_secs_f64()));
        output.push_str(&format!(
            "Living Cells: {} → {}\n\n",
            solution.metadata.predecessor_living_cells, solution.metadata.target_living_cells
        ));

        output.push_str("Predecessor:\n");
        output.push_str(&Self::format_grid_compact(&solution.predecessor));
        output.push('\n');
        output.push_str("Target:\n");
        output.push_str(&Self::format_grid_compact(&solution.target));

        output
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.cell_count() + grid.height());
        for row in grid.cells().chunks(grid.width()) {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with row and column numbers
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.width() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for (row, cells) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", row));
            for &cell in cells {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Save a solution under `output_dir`, returning the written path.
    ///
    /// Text output is the predecessor in the `0`/`1` grid format, so it can be
    /// fed back to `step` or `reverse`.
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join("predecessor.txt");
                std::fs::write(&path, grid_to_string(&solution.predecessor))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join("solution.json");
                solution.save_to_file(&path)?;
                path
            }
        };

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    pub fn highlight(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}
