//! Configuration management for simulation and reverse inference

pub mod settings;

pub use settings::{
    CliOverrides, InputConfig, ObjectivePolicy, OutputConfig, OutputFormat, Settings,
    SimulationConfig, SolverBackend, SolverConfig,
};
