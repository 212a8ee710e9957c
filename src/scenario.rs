use anyhow::{anyhow, Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

use crate::common::{has_even_parity, is_solvable, State};

/// One start/goal pair to solve.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PuzzleInstance {
    pub name: String,
    pub start: State,
    #[serde(default = "State::solved")]
    pub goal: State,
}

impl PuzzleInstance {
    pub fn new(name: &str, start: State, goal: State) -> Self {
        PuzzleInstance {
            name: name.to_string(),
            start,
            goal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Scenario {
    pub puzzles: Vec<PuzzleInstance>,
}

impl Scenario {
    pub fn load_from_yaml(path: &str) -> Result<Scenario> {
        let file = File::open(path).with_context(|| format!("cannot open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario: Scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("error parsing scenario {path}"))?;
        scenario
            .validate()
            .with_context(|| format!("invalid scenario {path}"))?;
        info!("Load {} puzzles from {path}", scenario.puzzles.len());
        Ok(scenario)
    }

    /// Every goal needs even parity for the solvability check to mean anything.
    pub fn validate(&self) -> Result<()> {
        for puzzle in &self.puzzles {
            if !has_even_parity(&puzzle.goal) {
                return Err(anyhow!(
                    "puzzle {}: goal {:?} has an odd inversion count",
                    puzzle.name,
                    puzzle.goal
                ));
            }
        }
        Ok(())
    }

    pub fn write_to_yaml(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }
}

/// Shuffle the nine values until the permutation can reach `goal`.
pub fn random_solvable_state<R: Rng + ?Sized>(goal: &State, rng: &mut R) -> State {
    let mut tiles = *goal.tiles();
    loop {
        tiles.shuffle(rng);
        // A shuffle of a permutation is a permutation.
        if let Ok(state) = State::new(tiles) {
            if is_solvable(&state, goal) {
                return state;
            }
        }
    }
}
