//! Solver adapter: binary linear programs solved through a SAT engine

use super::model::{LinearConstraints, LinearObjective, ObjectiveSense, VariableType};
use super::pseudo_boolean::{literal, CnfBuilder, Literal};
use crate::error::{GolError, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of one `solve` call
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A feasible (or, with an objective, optimal) assignment
    Solved {
        /// One value per program variable, `0.0` or `1.0`
        assignment: Vec<f64>,
        status: String,
        objective_value: Option<i64>,
    },
    /// No assignment satisfies the constraints
    Infeasible { status: String },
}

impl SolveOutcome {
    pub fn status(&self) -> &str {
        match self {
            SolveOutcome::Solved { status, .. } | SolveOutcome::Infeasible { status } => status,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveOutcome::Infeasible { .. })
    }
}

/// Capability to solve a binary linear program.
///
/// Sessions are stateful and must not be shared between concurrent solves.
pub trait LinearSolver {
    /// Backend name, for logging
    fn name(&self) -> &'static str;

    /// Declare `num_variables` variables, discarding any previous program
    fn initialize(&mut self, num_variables: usize, variable_type: VariableType);

    fn set_objective(&mut self, objective: LinearObjective);

    fn set_constraints(&mut self, constraints: LinearConstraints);

    /// Blocking solve; infeasibility is an outcome, engine failures are errors
    fn solve(&mut self) -> Result<SolveOutcome>;
}

/// Incremental SAT engine over DIMACS literals
pub trait SatEngine {
    fn name(&self) -> &'static str;

    fn add_clause(&mut self, clause: &[Literal]);

    /// `true` when satisfiable
    fn solve(&mut self) -> Result<bool>;

    /// Value of `var` in the last model
    fn value(&self, var: Literal) -> bool;
}

/// Statistics about the last solve
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub sat_calls: usize,
    pub solve_time: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Variables (with auxiliaries): {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  SAT calls: {}", self.sat_calls)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        Ok(())
    }
}

/// Linear solver adapter over any [`SatEngine`].
///
/// Constraints are translated to CNF on `solve`. With a non-trivial
/// objective, each model's objective value `v` is followed by the bound
/// `objective <= v - 1` until the engine reports unsatisfiable.
pub struct CnfLinearSolver<E: SatEngine> {
    name: &'static str,
    engine_factory: fn() -> Result<E>,
    num_variables: usize,
    objective: Option<LinearObjective>,
    constraints: LinearConstraints,
    statistics: SolverStatistics,
}

impl<E: SatEngine> CnfLinearSolver<E> {
    /// Adapter creating a fresh engine session for every `solve`
    pub fn new(engine_factory: fn() -> Result<E>) -> Result<Self> {
        // Probe once so an unusable backend is rejected at selection time
        let name = engine_factory()?.name();
        Ok(Self {
            name,
            engine_factory,
            num_variables: 0,
            objective: None,
            constraints: LinearConstraints::new(),
            statistics: SolverStatistics::default(),
        })
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    fn push_clauses(&mut self, engine: &mut E, builder: &mut CnfBuilder) {
        for clause in builder.drain_clauses() {
            engine.add_clause(&clause);
            self.statistics.clause_count += 1;
        }
        self.statistics.variable_count = builder.num_variables();
    }

    fn read_model(&self, engine: &E) -> Vec<bool> {
        (0..self.num_variables).map(|v| engine.value(literal(v))).collect()
    }

    fn run_engine(&mut self, engine: &mut E) -> Result<bool> {
        self.statistics.sat_calls += 1;
        engine.solve()
    }
}

impl<E: SatEngine> LinearSolver for CnfLinearSolver<E> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn initialize(&mut self, num_variables: usize, variable_type: VariableType) {
        match variable_type {
            VariableType::Binary => {}
        }
        self.num_variables = num_variables;
        self.objective = None;
        self.constraints = LinearConstraints::new();
        self.statistics = SolverStatistics::default();
    }

    fn set_objective(&mut self, objective: LinearObjective) {
        self.objective = Some(objective);
    }

    fn set_constraints(&mut self, constraints: LinearConstraints) {
        self.constraints = constraints;
    }

    fn solve(&mut self) -> Result<SolveOutcome> {
        let start = Instant::now();
        self.statistics = SolverStatistics::default();

        let highest_constrained = self.constraints.iter().filter_map(|c| c.max_variable()).max();
        let highest_objective = self
            .objective
            .as_ref()
            .and_then(|o| o.coefficients().keys().next_back().copied());
        if let Some(var) = highest_constrained.max(highest_objective) {
            if var >= self.num_variables {
                return Err(GolError::Solver(format!(
                    "program references variable {} but only {} were declared",
                    var, self.num_variables
                )));
            }
        }

        let mut engine = (self.engine_factory)()?;
        let mut builder = CnfBuilder::new(self.num_variables);
        for constraint in &self.constraints {
            builder.add_constraint(constraint);
        }
        if builder.is_contradictory() {
            self.statistics.solve_time = start.elapsed();
            return Ok(SolveOutcome::Infeasible {
                status: "infeasible (contradictory constraint)".to_string(),
            });
        }
        self.push_clauses(&mut engine, &mut builder);
        debug!(
            backend = engine.name(),
            variables = builder.num_variables(),
            clauses = self.statistics.clause_count,
            "translated constraints to CNF"
        );

        if !self.run_engine(&mut engine)? {
            self.statistics.solve_time = start.elapsed();
            return Ok(SolveOutcome::Infeasible {
                status: "infeasible".to_string(),
            });
        }
        let mut best = self.read_model(&engine);

        // Minimisation form of the objective
        let objective: Option<Vec<(usize, i64)>> = self
            .objective
            .as_ref()
            .filter(|o| !o.is_trivial())
            .map(|o| {
                let sign = match o.sense() {
                    ObjectiveSense::Minimize => 1,
                    ObjectiveSense::Maximize => -1,
                };
                o.coefficients().iter().map(|(&v, &c)| (v, sign * c)).collect()
            });

        let status = match &objective {
            None => "feasible",
            Some(terms) => {
                loop {
                    let value = evaluate(terms, &best);
                    builder.add_less_equal(terms.iter().copied(), value - 1);
                    if builder.is_contradictory() {
                        break;
                    }
                    self.push_clauses(&mut engine, &mut builder);
                    if !self.run_engine(&mut engine)? {
                        break;
                    }
                    best = self.read_model(&engine);
                    debug!(objective = evaluate(terms, &best), "improved objective");
                }
                "optimal"
            }
        };

        self.statistics.solve_time = start.elapsed();
        let objective_value = self
            .objective
            .as_ref()
            .filter(|o| !o.is_trivial())
            .map(|o| o.evaluate(&best));
        info!(
            backend = self.name,
            status,
            sat_calls = self.statistics.sat_calls,
            elapsed_ms = self.statistics.solve_time.as_millis() as u64,
            "solver finished"
        );

        Ok(SolveOutcome::Solved {
            assignment: best.into_iter().map(|b| if b { 1.0 } else { 0.0 }).collect(),
            status: status.to_string(),
            objective_value,
        })
    }
}

fn evaluate(terms: &[(usize, i64)], assignment: &[bool]) -> i64 {
    terms
        .iter()
        .filter(|&&(v, _)| assignment[v])
        .map(|&(_, c)| c)
        .sum()
}
