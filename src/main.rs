//! Command line front end: forward simulation and predecessor search

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game_of_life_ilp::{
    config::{CliOverrides, ObjectivePolicy, Settings, SolverBackend},
    game_of_life::{
        create_example_grids, load_grid_from_file, save_grid_to_file, seeded_random_grid, GameOfLifeRules, Grid,
    },
    reverse::{ReverseProblem, SolutionValidator},
    utils::{ColorOutput, SequenceViewer, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life_ilp")]
#[command(about = "Game of Life on a torus: step forward, or solve for a predecessor")]
#[command(version)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a grid forward
    Step {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid file to start from
        #[arg(short, long, conflicts_with = "random", required_unless_present = "random")]
        input: Option<PathBuf>,

        /// Start from a random grid of the given size, e.g. 8x8
        #[arg(long, value_name = "HxW", value_parser = parse_dimensions)]
        random: Option<(usize, usize)>,

        /// Seed for --random (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Write the final grid here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Find a grid whose next generation is the target
    Reverse {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Target state file (overrides config)
        #[arg(short, long, conflicts_with = "random")]
        target: Option<PathBuf>,

        /// Use a random target of the given size, e.g. 6x6
        #[arg(long, value_name = "HxW", value_parser = parse_dimensions)]
        random: Option<(usize, usize)>,

        /// Seed for --random (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Which predecessor to prefer (overrides config)
        #[arg(long, value_enum)]
        objective: Option<ObjectiveArg>,

        /// Solver backends to try, in order (overrides config)
        #[arg(short, long = "backend", value_enum)]
        backends: Vec<BackendArg>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a predecessor steps into a target
    Validate {
        /// Predecessor state file
        #[arg(short, long)]
        predecessor: PathBuf,

        /// Target state file
        #[arg(short, long)]
        target: PathBuf,
    },

    /// Page through grid files interactively
    View {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Create a default configuration and example target grids
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ObjectiveArg {
    None,
    MaximizeLive,
    MinimizeLive,
}

impl From<ObjectiveArg> for ObjectivePolicy {
    fn from(arg: ObjectiveArg) -> Self {
        match arg {
            ObjectiveArg::None => ObjectivePolicy::None,
            ObjectiveArg::MaximizeLive => ObjectivePolicy::MaximizeLive,
            ObjectiveArg::MinimizeLive => ObjectivePolicy::MinimizeLive,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Cadical,
    Varisat,
}

impl From<BackendArg> for SolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Cadical => SolverBackend::Cadical,
            BackendArg::Varisat => SolverBackend::Varisat,
        }
    }
}

/// Parse `HxW` (also accepts `x` or `X` with surrounding spaces)
fn parse_dimensions(value: &str) -> std::result::Result<(usize, usize), String> {
    let (height, width) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected HxW, got '{}'", value))?;
    let height = height
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid height '{}': {}", height.trim(), e))?;
    let width = width
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid width '{}': {}", width.trim(), e))?;
    Ok((height, width))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Step {
            config,
            input,
            random,
            seed,
            generations,
            output,
        } => step_command(config, input, random, seed, generations, output),
        Commands::Reverse {
            config,
            target,
            random,
            seed,
            objective,
            backends,
            output,
        } => reverse_command(config, target, random, seed, objective, backends, output),
        Commands::Validate { predecessor, target } => validate_command(predecessor, target),
        Commands::View { files } => view_command(files),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Random grid honouring the configured density and seed
fn random_grid_from(settings: &Settings, (height, width): (usize, usize)) -> Result<Grid> {
    let seed = settings.simulation.seed.unwrap_or_else(rand::random);
    tracing::info!(height, width, seed, "generating random grid");
    Ok(seeded_random_grid(height, width, settings.simulation.random_density, seed)?)
}

fn step_command(
    config_path: PathBuf,
    input: Option<PathBuf>,
    random: Option<(usize, usize)>,
    seed: Option<u64>,
    generations: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut settings = Settings::load_or_default(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        generations,
        seed,
        ..Default::default()
    });

    let start = match (input, random) {
        (Some(path), _) => load_grid_from_file(&path)?,
        (None, Some(dimensions)) => random_grid_from(&settings, dimensions)?,
        (None, None) => anyhow::bail!("Either --input or --random is required"),
    };

    let generations = settings.simulation.generations;
    println!("Generation 0 ({} living):", start.living_count());
    println!("{}", SolutionFormatter::format_grid_compact(&start));

    let path = GameOfLifeRules::evolution_path(&start, generations);
    for (i, grid) in path.iter().enumerate().skip(1) {
        println!("Generation {} ({} living):", i, grid.living_count());
        println!("{}", SolutionFormatter::format_grid_compact(grid));
    }

    if let Some(output) = output {
        let last = path.last().unwrap_or(&start);
        save_grid_to_file(last, &output)?;
        println!("{}", ColorOutput::success(&format!("Saved final grid to {}", output.display())));
    }

    Ok(())
}

fn reverse_command(
    config_path: PathBuf,
    target_file: Option<PathBuf>,
    random: Option<(usize, usize)>,
    seed: Option<u64>,
    objective: Option<ObjectiveArg>,
    backends: Vec<BackendArg>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting predecessor search"));

    let mut settings = Settings::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(&CliOverrides {
        seed,
        objective: objective.map(Into::into),
        backends: (!backends.is_empty()).then(|| backends.into_iter().map(Into::into).collect()),
        target_file,
        output_dir,
        ..Default::default()
    });
    settings.validate().context("Configuration validation failed")?;

    let problem = match random {
        Some(dimensions) => ReverseProblem::new(random_grid_from(&settings, dimensions)?, settings.solver.clone()),
        None => ReverseProblem::from_settings(&settings)?,
    };

    let target = problem.target_grid();
    println!("Target Grid ({}x{}, {} living):", target.height(), target.width(), target.living_count());
    println!("{}", SolutionFormatter::format_grid_with_coords(target));
    println!("{}", problem.encoding_statistics()?);

    let start_time = Instant::now();
    let solution = problem.solve().context("Failed to solve reverse problem")?;
    let total_time = start_time.elapsed();

    let Some(solution) = solution else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "No predecessor exists for this target (checked in {:.3}s)",
                total_time.as_secs_f64()
            ))
        );
        return Ok(());
    };

    println!(
        "{}",
        ColorOutput::success(&format!("Found a predecessor in {:.3}s", total_time.as_secs_f64()))
    );
    println!("{}", SolutionFormatter::format_solution(&solution));

    let validation = SolutionValidator::new().validate(&solution.predecessor, &solution.target)?;
    if validation.is_valid {
        println!("{}", ColorOutput::success("Predecessor verified by forward simulation"));
    } else {
        println!("{}", ColorOutput::error("Predecessor failed verification"));
        println!("{}", validation);
    }

    let saved = SolutionFormatter::save_solution(&solution, &settings.output.output_directory, settings.output.format)
        .context("Failed to save solution")?;
    println!("{}", ColorOutput::success(&format!("Solution saved to {}", saved.display())));

    Ok(())
}

fn validate_command(predecessor_path: PathBuf, target_path: PathBuf) -> Result<()> {
    let predecessor = load_grid_from_file(&predecessor_path)
        .with_context(|| format!("Failed to load predecessor from {}", predecessor_path.display()))?;
    let target = load_grid_from_file(&target_path)
        .with_context(|| format!("Failed to load target from {}", target_path.display()))?;

    let result = SolutionValidator::new()
        .validate(&predecessor, &target)
        .context("Validation failed")?;
    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Predecessor is valid"));
    } else {
        println!("{}", ColorOutput::error("Predecessor is invalid"));
        println!("Evolved predecessor:");
        println!("{}", SolutionFormatter::format_grid_compact(&GameOfLifeRules::step(&predecessor)));
    }

    Ok(())
}

fn view_command(files: Vec<PathBuf>) -> Result<()> {
    let frames = files
        .iter()
        .map(|path| Ok((path.display().to_string(), load_grid_from_file(path)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut viewer = SequenceViewer::new(frames)?;
    viewer.run(std::io::stdin().lock(), std::io::stdout().lock())
}

fn write_config(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings.to_file(path)?;
    println!("Created: {}", path.display());
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/target_states");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let mut default_settings = Settings::default();
    default_settings.input.target_state_file = Some(PathBuf::from("input/target_states/blinker.txt"));
    write_config(&config_dir.join("default.yaml"), &default_settings, force)?;

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example target states in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    let mut sparse = default_settings.clone();
    sparse.solver.objective = ObjectivePolicy::MinimizeLive;
    sparse.input.target_state_file = Some(PathBuf::from("input/target_states/glider.txt"));
    write_config(&examples_dir.join("sparse.yaml"), &sparse, force)?;

    let mut varisat_first = default_settings.clone();
    varisat_first.solver.backends = vec![SolverBackend::Varisat, SolverBackend::Cadical];
    varisat_first.input.target_state_file = Some(PathBuf::from("input/target_states/garden_of_eden.txt"));
    write_config(&examples_dir.join("varisat.yaml"), &varisat_first, force)?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your target states to {}", input_dir.display());
    println!("3. Run: cargo run -- reverse --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_ilp",
            "-v",
            "reverse",
            "--config",
            "test.yaml",
            "--random",
            "6x7",
            "--objective",
            "minimize-live",
            "--backend",
            "varisat",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Reverse {
                random,
                objective,
                backends,
                ..
            } => {
                assert_eq!(random, Some((6, 7)));
                assert!(matches!(objective, Some(ObjectiveArg::MinimizeLive)));
                assert!(matches!(backends.as_slice(), [BackendArg::Varisat]));
            }
            _ => panic!("expected reverse"),
        }
    }

    #[test]
    fn test_step_requires_a_source() {
        assert!(Cli::try_parse_from(["game_of_life_ilp", "step"]).is_err());
        assert!(Cli::try_parse_from(["game_of_life_ilp", "step", "--input", "a.txt", "--random", "4x4"]).is_err());
        assert!(Cli::try_parse_from(["game_of_life_ilp", "step", "--random", "4x4", "-g", "3"]).is_ok());
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("8x10"), Ok((8, 10)));
        assert_eq!(parse_dimensions(" 3 X 4 "), Ok((3, 4)));
        assert!(parse_dimensions("8").is_err());
        assert!(parse_dimensions("ax3").is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config = temp_dir.path().join("config/default.yaml");
        assert!(config.exists());
        assert!(temp_dir.path().join("config/examples/sparse.yaml").exists());
        assert!(temp_dir.path().join("input/target_states/glider.txt").exists());
        assert!(temp_dir.path().join("output/solutions").exists());

        let settings: Settings = serde_yaml::from_str(&std::fs::read_to_string(config).unwrap()).unwrap();
        assert_eq!(
            settings.input.target_state_file,
            Some(PathBuf::from("input/target_states/blinker.txt"))
        );
    }

    #[test]
    fn test_step_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out/after.txt");
        std::fs::write(&input, "00000\n00100\n00100\n00100\n00000\n").unwrap();

        step_command(
            temp_dir.path().join("missing.yaml"),
            Some(input),
            None,
            None,
            Some(2),
            Some(output.clone()),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "00000\n00100\n00100\n00100\n00000\n"
        );
    }
}
