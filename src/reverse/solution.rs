//! Solution record for a reverse Game of Life problem

use crate::game_of_life::{GameOfLifeRules, Grid};
use crate::ilp::EncodingStatistics;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A predecessor together with how it was found
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Grid whose single step is `target`
    pub predecessor: Grid,
    pub target: Grid,
    /// Backend that produced the assignment
    pub backend: String,
    /// `"optimal"` or `"feasible"`
    pub status: String,
    pub objective_value: Option<i64>,
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionMetadata {
    pub predecessor_living_cells: usize,
    pub target_living_cells: usize,
    /// Fraction of live cells in the predecessor
    pub predecessor_density: f64,
    pub variables: usize,
    pub constraints: usize,
}

impl SolutionMetadata {
    fn analyze(predecessor: &Grid, target: &Grid, statistics: &EncodingStatistics) -> Self {
        let predecessor_living_cells = predecessor.living_count();
        Self {
            predecessor_living_cells,
            target_living_cells: target.living_count(),
            predecessor_density: predecessor_living_cells as f64 / predecessor.cell_count() as f64,
            variables: statistics.cell_variables + statistics.slack_variables,
            constraints: statistics.total_constraints,
        }
    }
}

impl Solution {
    pub fn new(
        predecessor: Grid,
        target: Grid,
        backend: impl Into<String>,
        status: impl Into<String>,
        objective_value: Option<i64>,
        solve_time: Duration,
        statistics: &EncodingStatistics,
    ) -> Self {
        let metadata = SolutionMetadata::analyze(&predecessor, &target, statistics);
        Self {
            predecessor,
            target,
            backend: backend.into(),
            status: status.into(),
            objective_value,
            solve_time,
            metadata,
        }
    }

    /// Predecessor followed by target
    pub fn evolution_path(&self) -> Vec<Grid> {
        GameOfLifeRules::evolution_path(&self.predecessor, 1)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = self.to_json().context("Failed to serialize solution")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write solution: {}", path.display()))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read solution: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse solution: {}", path.display()))
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Backend: {} ({})", self.backend, self.status)?;
        if let Some(value) = self.objective_value {
            writeln!(f, "Objective: {}", value)?;
        }
        writeln!(f, "Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(
            f,
            "Living cells: {} -> {}",
            self.metadata.predecessor_living_cells, self.metadata.target_living_cells
        )?;
        writeln!(f, "Predecessor:")?;
        write!(f, "{}", self.predecessor)?;
        writeln!(f, "Target:")?;
        write!(f, "{}", self.target)
    }
}
