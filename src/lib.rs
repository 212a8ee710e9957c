pub mod algorithm;
pub mod common;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod report;
pub mod scenario;
pub mod solver;
pub mod stat;

pub use common::{is_solvable, State};
pub use heuristic::HeuristicKind;
pub use solver::{solve, solve_with_budget, Solution, SolveOutcome};
