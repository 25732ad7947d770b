//! SAT engines backing the linear solver adapter
//!
//! Each engine is compiled only with its Cargo feature.

#[cfg(any(feature = "cadical", feature = "varisat"))]
use super::pseudo_boolean::Literal;
#[cfg(any(feature = "cadical", feature = "varisat"))]
use super::solver::SatEngine;
#[cfg(any(feature = "cadical", feature = "varisat"))]
use crate::error::{GolError, Result};

/// CaDiCaL through the `cadical` crate
#[cfg(feature = "cadical")]
pub struct CadicalEngine {
    solver: cadical::Solver,
    max_var: Literal,
}

#[cfg(feature = "cadical")]
impl CadicalEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            solver: cadical::Solver::new(),
            max_var: 0,
        })
    }
}

#[cfg(feature = "cadical")]
impl SatEngine for CadicalEngine {
    fn name(&self) -> &'static str {
        "cadical"
    }

    fn add_clause(&mut self, clause: &[Literal]) {
        if let Some(highest) = clause.iter().map(|l| l.abs()).max() {
            self.max_var = self.max_var.max(highest);
        }
        self.solver.add_clause(clause.iter().copied());
    }

    fn solve(&mut self) -> Result<bool> {
        self.solver
            .solve()
            .ok_or_else(|| GolError::Solver("cadical stopped without a result".to_string()))
    }

    fn value(&self, var: Literal) -> bool {
        // Variables never mentioned in a clause are unconstrained
        var <= self.max_var && self.solver.value(var).unwrap_or(false)
    }
}

/// Varisat, a pure Rust CDCL solver
#[cfg(feature = "varisat")]
pub struct VarisatEngine {
    solver: varisat::Solver<'static>,
    model: Vec<bool>,
}

#[cfg(feature = "varisat")]
impl VarisatEngine {
    pub fn new() -> Result<Self> {
        Ok(Self {
            solver: varisat::Solver::new(),
            model: Vec::new(),
        })
    }
}

#[cfg(feature = "varisat")]
impl SatEngine for VarisatEngine {
    fn name(&self) -> &'static str {
        "varisat"
    }

    fn add_clause(&mut self, clause: &[Literal]) {
        use varisat::ExtendFormula;

        let lits: Vec<varisat::Lit> = clause
            .iter()
            .map(|&l| varisat::Lit::from_dimacs(l as isize))
            .collect();
        self.solver.add_clause(&lits);
    }

    fn solve(&mut self) -> Result<bool> {
        let satisfiable = self
            .solver
            .solve()
            .map_err(|e| GolError::Solver(format!("varisat: {}", e)))?;

        self.model.clear();
        if satisfiable {
            for lit in self.solver.model().unwrap_or_default() {
                let index = lit.var().index();
                if index >= self.model.len() {
                    self.model.resize(index + 1, false);
                }
                self.model[index] = lit.is_positive();
            }
        }
        Ok(satisfiable)
    }

    fn value(&self, var: Literal) -> bool {
        self.model.get(var as usize - 1).copied().unwrap_or(false)
    }
}
