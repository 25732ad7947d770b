//! Configuration settings for simulation and reverse inference

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Forward steps taken by the `step` command
    pub generations: usize,
    /// Live probability for randomly initialised grids
    pub random_density: f64,
    /// Seed for random grids; fresh entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Backends tried in order; the first that initialises is used
    pub backends: Vec<SolverBackend>,
    pub objective: ObjectivePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    Varisat,
}

impl std::fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SolverBackend::Cadical => "cadical",
            SolverBackend::Varisat => "varisat",
        })
    }
}

/// Which predecessor to prefer when several exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectivePolicy {
    /// Any feasible predecessor
    #[default]
    None,
    MaximizeLive,
    MinimizeLive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub target_state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generations: 1,
            random_density: 0.5,
            seed: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backends: vec![SolverBackend::Cadical, SolverBackend::Varisat],
            objective: ObjectivePolicy::None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            output_directory: PathBuf::from("output/solutions"),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(
                path = %path.as_ref().display(),
                "config file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.backends.is_empty() {
            anyhow::bail!("At least one solver backend must be listed");
        }

        if !(0.0..=1.0).contains(&self.simulation.random_density) {
            anyhow::bail!(
                "Random density must lie in [0, 1], got {}",
                self.simulation.random_density
            );
        }

        if let Some(ref target) = self.input.target_state_file {
            if !target.exists() {
                anyhow::bail!("Target state file does not exist: {}", target.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(objective) = cli_overrides.objective {
            self.solver.objective = objective;
        }
        if let Some(ref backends) = cli_overrides.backends {
            self.solver.backends = backends.clone();
        }
        if let Some(ref target_file) = cli_overrides.target_file {
            self.input.target_state_file = Some(target_file.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub seed: Option<u64>,
    pub objective: Option<ObjectivePolicy>,
    pub backends: Option<Vec<SolverBackend>>,
    pub target_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}
