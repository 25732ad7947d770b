//! Reverse Game of Life problem definition

use super::{Solution, SolutionValidator};
use crate::config::{Settings, SolverConfig};
use crate::error::{GolError, Result};
use crate::game_of_life::{load_grid_from_file, Grid};
use crate::ilp::decoder::decode_with;
use crate::ilp::{select_backend, ConstraintEncoder, EncodedProblem, EncodingStatistics, LinearSolver, SolveOutcome};
use anyhow::Context;
use std::time::Instant;
use tracing::{info, warn};

/// Answer to "what came before this grid?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverseOutcome {
    /// A grid whose single step is the target
    Predecessor(Grid),
    /// The target has no predecessor
    Infeasible,
}

impl ReverseOutcome {
    pub fn predecessor(&self) -> Option<&Grid> {
        match self {
            ReverseOutcome::Predecessor(grid) => Some(grid),
            ReverseOutcome::Infeasible => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, ReverseOutcome::Infeasible)
    }
}

impl From<Option<Solution>> for ReverseOutcome {
    fn from(solution: Option<Solution>) -> Self {
        match solution {
            Some(solution) => ReverseOutcome::Predecessor(solution.predecessor),
            None => ReverseOutcome::Infeasible,
        }
    }
}

/// Represents a reverse Game of Life problem
pub struct ReverseProblem {
    config: SolverConfig,
    target_grid: Grid,
    encoder: ConstraintEncoder,
    validator: SolutionValidator,
}

impl ReverseProblem {
    pub fn new(target_grid: Grid, config: SolverConfig) -> Self {
        let encoder = ConstraintEncoder::new(config.objective);
        Self {
            config,
            target_grid,
            encoder,
            validator: SolutionValidator::new(),
        }
    }

    /// Build from settings, loading the configured target file
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let path = settings
            .input
            .target_state_file
            .as_ref()
            .context("No target state file configured")?;
        let target_grid = load_grid_from_file(path).context("Failed to load target state file")?;
        Ok(Self::new(target_grid, settings.solver.clone()))
    }

    pub fn target_grid(&self) -> &Grid {
        &self.target_grid
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn encoding_statistics(&self) -> Result<EncodingStatistics> {
        Ok(self.encoder.encode(&self.target_grid)?.statistics)
    }

    /// Solve with the first backend of the configured list that initialises
    pub fn solve(&self) -> Result<Option<Solution>> {
        let mut solver = select_backend(&self.config.backends)?;
        self.solve_with(solver.as_mut())
    }

    /// Solve and keep only the predecessor
    pub fn outcome(&self) -> Result<ReverseOutcome> {
        self.solve().map(ReverseOutcome::from)
    }

    /// Solve on a caller-provided session.
    ///
    /// `Ok(None)` means the target has no predecessor. A decoded grid that does
    /// not evolve into the target is reported as a solver failure.
    pub fn solve_with(&self, solver: &mut dyn LinearSolver) -> Result<Option<Solution>> {
        let start_time = Instant::now();
        let target = &self.target_grid;

        info!(
            height = target.height(),
            width = target.width(),
            living_cells = target.living_count(),
            backend = solver.name(),
            objective = ?self.config.objective,
            "solving reverse step"
        );

        let problem = self.encoder.encode(target)?;
        solver.initialize(problem.num_variables(), problem.variable_type);

        let EncodedProblem {
            index_map,
            objective,
            constraints,
            statistics,
            ..
        } = problem;
        solver.set_objective(objective);
        solver.set_constraints(constraints);

        let (assignment, status, objective_value) = match solver.solve()? {
            SolveOutcome::Infeasible { status } => {
                info!(backend = solver.name(), %status, "target has no predecessor");
                return Ok(None);
            }
            SolveOutcome::Solved {
                assignment,
                status,
                objective_value,
            } => (assignment, status, objective_value),
        };

        let predecessor = decode_with(&assignment, &index_map)?;
        let validation = self.validator.validate(&predecessor, target)?;
        if let Some(message) = validation.error_message() {
            warn!(backend = solver.name(), %message, "decoded predecessor failed validation");
            return Err(GolError::Solver(format!(
                "{} returned an assignment that is not a predecessor: {}",
                solver.name(),
                message
            )));
        }

        let solve_time = start_time.elapsed();
        info!(
            backend = solver.name(),
            %status,
            predecessor_living_cells = predecessor.living_count(),
            elapsed_ms = solve_time.as_millis() as u64,
            "found predecessor"
        );

        Ok(Some(Solution::new(
            predecessor,
            target.clone(),
            solver.name(),
            status,
            objective_value,
            solve_time,
            &statistics,
        )))
    }
}
