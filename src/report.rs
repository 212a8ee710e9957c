use std::io::Write;
use tracing::warn;

use crate::common::is_solvable;
use crate::config::Config;
use crate::heuristic::HeuristicKind;
use crate::scenario::PuzzleInstance;
use crate::solver::{solve_with_budget, SolveOutcome};
use crate::stat::Stats;

/// Solve one puzzle, skipping the search when parity already rules it out.
pub fn solve_puzzle(
    puzzle: &PuzzleInstance,
    heuristic: HeuristicKind,
    max_expansions: Option<usize>,
) -> SolveOutcome {
    if !is_solvable(&puzzle.start, &puzzle.goal) {
        warn!(
            "{}: {:?} cannot reach {:?}, no solution",
            puzzle.name, puzzle.start, puzzle.goal
        );
        return SolveOutcome::NoSolution {
            stats: Stats::default(),
        };
    }
    solve_with_budget(puzzle.start, puzzle.goal, heuristic, max_expansions)
}

/// Log and record the outcome, then write the user-facing report to `out`.
/// In JSON mode `out` receives exactly one JSON document per call.
pub fn report<W: Write>(
    out: &mut W,
    config: &Config,
    puzzle: &PuzzleInstance,
    heuristic: HeuristicKind,
    outcome: &SolveOutcome,
) -> anyhow::Result<()> {
    let moves = outcome.solution().map(|s| s.move_count());
    outcome.stats().print(heuristic, moves);

    if let Some(output_path) = config.output_path.as_ref() {
        outcome
            .stats()
            .write_csv(output_path, &puzzle.name, heuristic, moves)?;
    }

    if config.json {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)?;
        return Ok(());
    }

    match outcome {
        SolveOutcome::Solved(solution) => {
            writeln!(
                out,
                "{} [{heuristic}]: {} moves, {} nodes expanded, {:?}",
                puzzle.name,
                solution.move_count(),
                solution.nodes_expanded(),
                solution.elapsed()
            )?;
            if !config.quiet && !config.compare {
                let moves = solution.moves();
                for (step, state) in solution.path.iter().enumerate() {
                    match step.checked_sub(1).and_then(|i| moves.get(i)) {
                        Some(mv) => writeln!(out, "Step {step}: {mv}")?,
                        None => writeln!(out, "Start")?,
                    }
                    writeln!(out, "{state}")?;
                }
            }
        }
        SolveOutcome::NoSolution { .. } => {
            writeln!(out, "{} [{heuristic}]: no solution", puzzle.name)?;
        }
        SolveOutcome::BudgetExhausted { stats } => {
            writeln!(
                out,
                "{} [{heuristic}]: gave up after {} expansions",
                puzzle.name, stats.nodes_expanded
            )?;
        }
    }
    Ok(())
}
