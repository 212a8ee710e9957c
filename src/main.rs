use eight_puzzle::config::{Cli, Config};
use eight_puzzle::heuristic::HeuristicKind;
use eight_puzzle::scenario::{random_solvable_state, PuzzleInstance, Scenario};
use eight_puzzle::report::{report, solve_puzzle};
use eight_puzzle::solver::SolveOutcome;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    };
    let config = config.override_from_command_line(&cli)?;
    debug!("config: {config:?}");

    let puzzles = if let Some(scenario_path) = config.scenario_path.as_ref() {
        Scenario::load_from_yaml(scenario_path)?.puzzles
    } else if config.randomize {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let start = random_solvable_state(&config.goal, &mut rng);
        info!("Randomized start {start:?} with seed {}", config.seed);
        vec![PuzzleInstance::new("random", start, config.goal)]
    } else {
        vec![PuzzleInstance::new("default", config.start, config.goal)]
    };

    let heuristics: Vec<HeuristicKind> = if config.compare {
        HeuristicKind::ALL.to_vec()
    } else {
        vec![config.heuristic]
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut last_solution = None;
    for puzzle in &puzzles {
        for &heuristic in &heuristics {
            let outcome = solve_puzzle(puzzle, heuristic, config.max_expansions);
            report(&mut out, &config, puzzle, heuristic, &outcome)?;
            if let SolveOutcome::Solved(solution) = outcome {
                last_solution = Some(solution);
            }
        }
    }

    if let (Some(path), Some(solution)) = (config.solution_path.as_ref(), last_solution) {
        let file = std::fs::File::create(path)
            .with_context(|| format!("cannot create solution file: {path}"))?;
        serde_yaml::to_writer(file, &solution.path)?;
        info!("Write solution path to {path}");
    }

    Ok(())
}
