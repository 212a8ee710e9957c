use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;

use crate::common::{has_even_parity, State};
use crate::heuristic::HeuristicKind;

#[derive(Parser, Debug)]
#[command(
    name = "8-Puzzle Solver",
    about = "Optimal 8-puzzle solving with A* and admissible heuristics.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Start state, e.g. 2,6,5,0,8,7,4,3,1")]
    pub start: Option<State>,

    #[arg(long, help = "Goal state, defaults to 1,2,3,4,5,6,7,8,0")]
    pub goal: Option<State>,

    #[arg(long, value_enum, help = "Heuristic to guide the search")]
    pub heuristic: Option<HeuristicKind>,

    #[arg(long, help = "Replace the start state with a random solvable one")]
    pub randomize: bool,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Path to a YAML file listing puzzles to solve")]
    pub scenario_path: Option<String>,

    #[arg(long, help = "Give up after this many node expansions")]
    pub max_expansions: Option<usize>,

    #[arg(long, help = "Solve with every heuristic and compare diagnostics")]
    pub compare: bool,

    #[arg(long, help = "Append diagnostics to this CSV file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Write the last solution path to this YAML file")]
    pub solution_path: Option<String>,

    #[arg(long, help = "Print the solve report as JSON")]
    pub json: bool,

    #[arg(long, help = "Do not print the boards along the solution path")]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub start: State,
    pub goal: State,
    pub heuristic: HeuristicKind,
    pub randomize: bool,
    pub seed: u64,
    pub scenario_path: Option<String>,
    pub max_expansions: Option<usize>,
    pub compare: bool,
    pub output_path: Option<String>,
    pub solution_path: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            // 23 moves from the goal.
            start: State::from_tiles_unchecked([2, 6, 5, 0, 8, 7, 4, 3, 1]),
            goal: State::solved(),
            heuristic: HeuristicKind::Manhattan,
            randomize: false,
            seed: 0,
            scenario_path: None,
            max_expansions: None,
            compare: false,
            output_path: None,
            solution_path: None,
            json: false,
            quiet: false,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(start) = cli.start {
            self.start = start;
        }
        if let Some(goal) = cli.goal {
            self.goal = goal;
        }
        if let Some(heuristic) = cli.heuristic {
            self.heuristic = heuristic;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if cli.scenario_path.is_some() {
            self.scenario_path = cli.scenario_path.clone();
        }
        if cli.max_expansions.is_some() {
            self.max_expansions = cli.max_expansions;
        }
        if cli.output_path.is_some() {
            self.output_path = cli.output_path.clone();
        }
        if cli.solution_path.is_some() {
            self.solution_path = cli.solution_path.clone();
        }
        self.randomize |= cli.randomize;
        self.compare |= cli.compare;
        self.json |= cli.json;
        self.quiet |= cli.quiet;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_expansions == Some(0) {
            return Err(anyhow!("max-expansions must be greater than 0"));
        }
        if self.randomize && self.scenario_path.is_some() {
            return Err(anyhow!(
                "randomize and scenario-path cannot be used together"
            ));
        }
        if !has_even_parity(&self.goal) {
            return Err(anyhow!(
                "goal {:?} has an odd inversion count, solvability cannot be decided",
                self.goal
            ));
        }
        Ok(())
    }
}
