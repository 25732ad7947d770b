//! Reverse Game of Life: find a grid whose next generation is the target

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{ReverseOutcome, ReverseProblem};
pub use solution::{Solution, SolutionMetadata};
pub use validator::{RuleViolation, SolutionValidator, ValidationResult};
