use crate::algorithm::{AStarEngine, EngineStatus};
use crate::common::{move_between, Move, State};
use crate::heuristic::HeuristicKind;
use crate::stat::Stats;

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub path: Vec<State>,
    pub heuristic: HeuristicKind,
    pub stats: Stats,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn nodes_expanded(&self) -> usize {
        self.stats.nodes_expanded
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed()
    }

    /// Moves of the blank along the path. Empty if the path is not a chain
    /// of single moves, which `verify` reports.
    pub fn moves(&self) -> Vec<Move> {
        self.path
            .windows(2)
            .map(|pair| move_between(&pair[0], &pair[1]))
            .collect::<Option<Vec<Move>>>()
            .unwrap_or_default()
    }

    pub fn verify(&self, start: &State, goal: &State) -> bool {
        if self.path.first() != Some(start) || self.path.last() != Some(goal) {
            return false;
        }
        self.path
            .windows(2)
            .all(|pair| move_between(&pair[0], &pair[1]).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SolveOutcome {
    Solved(Solution),
    /// The frontier ran dry: start and goal are in different parity classes.
    NoSolution { stats: Stats },
    /// The caller's expansion budget ran out first.
    BudgetExhausted { stats: Stats },
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn stats(&self) -> &Stats {
        match self {
            SolveOutcome::Solved(solution) => &solution.stats,
            SolveOutcome::NoSolution { stats } | SolveOutcome::BudgetExhausted { stats } => stats,
        }
    }
}

pub fn solve(start: State, goal: State, heuristic: HeuristicKind) -> SolveOutcome {
    solve_with_budget(start, goal, heuristic, None)
}

/// Same as [`solve`], but stops once `max_expansions` nodes have been expanded
/// without reaching the goal.
pub fn solve_with_budget(
    start: State,
    goal: State,
    heuristic: HeuristicKind,
    max_expansions: Option<usize>,
) -> SolveOutcome {
    let mut engine = AStarEngine::new(start, goal, heuristic);

    let status = match max_expansions {
        None => engine.run(),
        Some(limit) => loop {
            if engine.stats().nodes_expanded >= limit {
                debug!("expansion budget {limit} exhausted");
                break engine.status();
            }
            let status = engine.step();
            if status.is_terminal() {
                break status;
            }
        },
    };

    let stats = engine.stats();
    match (status, engine.path()) {
        (EngineStatus::Succeeded, Some(path)) => {
            info!(
                "solved {start:?} in {} moves with {heuristic}",
                path.len() - 1
            );
            SolveOutcome::Solved(Solution {
                path,
                heuristic,
                stats,
            })
        }
        (EngineStatus::Failed, _) => {
            info!("no solution for {start:?} -> {goal:?}");
            SolveOutcome::NoSolution { stats }
        }
        _ => SolveOutcome::BudgetExhausted { stats },
    }
}
