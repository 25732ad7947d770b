//! Backend selection for the linear solver adapter

use super::solver::LinearSolver;
use crate::config::SolverBackend;
use crate::error::{GolError, Result};
use tracing::{debug, warn};

/// Construct a single backend
pub fn create_backend(backend: SolverBackend) -> Result<Box<dyn LinearSolver>> {
    match backend {
        SolverBackend::Cadical => cadical_backend(),
        SolverBackend::Varisat => varisat_backend(),
    }
}

/// First backend of `preferences` that initialises.
///
/// Failures are logged and the next backend is tried; if none succeeds the
/// error lists every backend attempted.
pub fn select_backend(preferences: &[SolverBackend]) -> Result<Box<dyn LinearSolver>> {
    let mut failures = Vec::with_capacity(preferences.len());

    for &backend in preferences {
        match create_backend(backend) {
            Ok(solver) => {
                debug!(backend = %backend, "selected solver backend");
                return Ok(solver);
            }
            Err(e) => {
                warn!(backend = %backend, error = %e, "solver backend unavailable, trying next");
                failures.push(format!("{}: {}", backend, e));
            }
        }
    }

    Err(GolError::SolverUnavailable {
        tried: if failures.is_empty() {
            "no backends configured".to_string()
        } else {
            failures.join("; ")
        },
    })
}

#[cfg(feature = "cadical")]
fn cadical_backend() -> Result<Box<dyn LinearSolver>> {
    use super::backends::CadicalEngine;
    use super::solver::CnfLinearSolver;

    Ok(Box::new(CnfLinearSolver::new(CadicalEngine::new)?))
}

#[cfg(not(feature = "cadical"))]
fn cadical_backend() -> Result<Box<dyn LinearSolver>> {
    Err(GolError::SolverUnavailable {
        tried: "cadical (built without the `cadical` feature)".to_string(),
    })
}

#[cfg(feature = "varisat")]
fn varisat_backend() -> Result<Box<dyn LinearSolver>> {
    use super::backends::VarisatEngine;
    use super::solver::CnfLinearSolver;

    Ok(Box::new(CnfLinearSolver::new(VarisatEngine::new)?))
}

#[cfg(not(feature = "varisat"))]
fn varisat_backend() -> Result<Box<dyn LinearSolver>> {
    Err(GolError::SolverUnavailable {
        tried: "varisat (built without the `varisat` feature)".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_preferences() {
        assert!(matches!(
            select_backend(&[]),
            Err(GolError::SolverUnavailable { .. })
        ));
    }

    #[cfg(feature = "cadical")]
    #[test]
    fn test_cadical_preferred() {
        let solver = select_backend(&[SolverBackend::Cadical, SolverBackend::Varisat]).unwrap();
        assert_eq!(solver.name(), "cadical");
    }

    #[cfg(feature = "varisat")]
    #[test]
    fn test_varisat_selected_when_listed_first() {
        let solver = select_backend(&[SolverBackend::Varisat, SolverBackend::Cadical]).unwrap();
        assert_eq!(solver.name(), "varisat");
    }

    #[cfg(all(feature = "varisat", not(feature = "cadical")))]
    #[test]
    fn test_falls_back_past_missing_backend() {
        let solver = select_backend(&[SolverBackend::Cadical, SolverBackend::Varisat]).unwrap();
        assert_eq!(solver.name(), "varisat");
    }

    #[cfg(not(any(feature = "cadical", feature = "varisat")))]
    #[test]
    fn test_no_backend_compiled() {
        let err = select_backend(&[SolverBackend::Cadical, SolverBackend::Varisat]).unwrap_err();
        assert!(err.to_string().contains("cadical"));
        assert!(err.to_string().contains("varisat"));
    }
}
