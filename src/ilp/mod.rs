//! Integer linear encoding of the reverse step and the solver adapter

pub mod backends;
pub mod decoder;
pub mod encoder;
pub mod model;
pub mod pseudo_boolean;
pub mod solver;
pub mod solver_factory;
pub mod variables;

pub use decoder::decode;
pub use encoder::{ConstraintEncoder, EncodedProblem, EncodingStatistics};
pub use model::{LinearConstraint, LinearConstraints, LinearObjective, ObjectiveSense, Relation, VariableType};
pub use solver::{CnfLinearSolver, LinearSolver, SatEngine, SolveOutcome};
pub use solver_factory::{create_backend, select_backend};
pub use variables::VariableIndexMap;
