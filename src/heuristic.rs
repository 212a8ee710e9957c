use crate::common::{State, CELLS, SIDE};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Admissible estimators of the remaining move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    Misplaced,
    Manhattan,
    Euclidean,
    LinearConflict,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Misplaced,
        HeuristicKind::Manhattan,
        HeuristicKind::Euclidean,
        HeuristicKind::LinearConflict,
    ];

    pub fn estimate(&self, state: &State, goal: &State) -> f64 {
        match self {
            HeuristicKind::Misplaced => misplaced_tiles(state, goal) as f64,
            HeuristicKind::Manhattan => manhattan_distance(state, goal) as f64,
            HeuristicKind::Euclidean => euclidean_distance(state, goal),
            HeuristicKind::LinearConflict => manhattan_linear_conflict(state, goal) as f64,
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            HeuristicKind::Misplaced => "misplaced",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::LinearConflict => "linear-conflict",
        };
        write!(f, "{}", s)
    }
}

/// Row/column offsets between where each tile sits and where `goal` wants it.
fn tile_offsets<'a>(
    state: &'a State,
    goal: &State,
) -> impl Iterator<Item = (isize, isize)> + 'a {
    let goal_positions = goal.positions();
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(move |(index, &value)| {
            let target = goal_positions[value as usize];
            (
                (index / SIDE) as isize - (target / SIDE) as isize,
                (index % SIDE) as isize - (target % SIDE) as isize,
            )
        })
}

pub fn misplaced_tiles(state: &State, goal: &State) -> usize {
    state
        .tiles()
        .iter()
        .zip(goal.tiles())
        .filter(|&(&value, &wanted)| value != 0 && value != wanted)
        .count()
}

pub fn manhattan_distance(state: &State, goal: &State) -> usize {
    tile_offsets(state, goal)
        .map(|(dr, dc)| dr.unsigned_abs() + dc.unsigned_abs())
        .sum()
}

pub fn euclidean_distance(state: &State, goal: &State) -> f64 {
    tile_offsets(state, goal)
        .map(|(dr, dc)| ((dr * dr + dc * dc) as f64).sqrt())
        .sum()
}

pub fn manhattan_linear_conflict(state: &State, goal: &State) -> usize {
    manhattan_distance(state, goal) + 2 * linear_conflicts(state, goal)
}

/// Tiles that have to leave their row or column to let the rest pass.
/// Rows and columns are counted independently and summed.
pub fn linear_conflicts(state: &State, goal: &State) -> usize {
    let goal_positions = goal.positions();
    let tiles = state.tiles();
    let mut conflicts = 0;

    for line in 0..SIDE {
        // Goal columns of tiles in row `line` that also belong to that row.
        let row: Vec<usize> = (0..SIDE)
            .map(|col| tiles[line * SIDE + col])
            .filter(|&value| value != 0 && goal_positions[value as usize] / SIDE == line)
            .map(|value| goal_positions[value as usize] % SIDE)
            .collect();
        conflicts += line_conflicts(&row);

        let column: Vec<usize> = (0..SIDE)
            .map(|row| tiles[row * SIDE + line])
            .filter(|&value| value != 0 && goal_positions[value as usize] % SIDE == line)
            .map(|value| goal_positions[value as usize] / SIDE)
            .collect();
        conflicts += line_conflicts(&column);
    }

    conflicts
}

/// `targets` are goal coordinates along one line, in current order. Returns
/// how many tiles must be removed before the remainder is sorted, removing
/// the tile with the most conflicts first.
fn line_conflicts(targets: &[usize]) -> usize {
    debug_assert!(targets.len() <= SIDE);
    let mut removed = [false; CELLS];
    let mut count = 0;

    loop {
        let mut conflicts = [0usize; CELLS];
        for i in 0..targets.len() {
            for j in (i + 1)..targets.len() {
                if !removed[i] && !removed[j] && targets[i] > targets[j] {
                    conflicts[i] += 1;
                    conflicts[j] += 1;
                }
            }
        }

        // First index wins ties.
        let worst = (0..targets.len()).fold(None, |best: Option<usize>, i| match best {
            Some(b) if conflicts[b] >= conflicts[i] => Some(b),
            _ => Some(i),
        });

        match worst {
            Some(i) if conflicts[i] > 0 => {
                removed[i] = true;
                count += 1;
            }
            _ => return count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> State {
        s.parse().unwrap()
    }

    #[test]
    fn test_goal_is_zero() {
        let goal = State::solved();
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.estimate(&goal, &goal), 0.0, "{kind}");
        }
    }

    #[test]
    fn test_misplaced_ignores_blank() {
        let goal = State::solved();
        // 8 and the blank swapped: only tile 8 counts.
        assert_eq!(misplaced_tiles(&state("123456708"), &goal), 1);
        assert_eq!(misplaced_tiles(&state("265087431"), &goal), 8);
    }

    #[test]
    fn test_manhattan() {
        let goal = State::solved();
        assert_eq!(manhattan_distance(&state("123456708"), &goal), 1);
        // 2 6 5 / _ 8 7 / 4 3 1
        // 2:1 6:2 5:2 8:1 7:3 4:1 3:3 1:4
        assert_eq!(manhattan_distance(&state("265087431"), &goal), 17);
    }

    #[test]
    fn test_euclidean() {
        let goal = State::solved();
        let s = state("265087431");
        let expected =
            3.0 + 2.0 * 2.0_f64.sqrt() + 2.0 * 5.0_f64.sqrt() + 8.0_f64.sqrt();
        assert!((euclidean_distance(&s, &goal) - expected).abs() < 1e-9);
        assert!(euclidean_distance(&s, &goal) <= manhattan_distance(&s, &goal) as f64);
    }

    #[test]
    fn test_linear_conflict_row() {
        let goal = State::solved();
        // 2 1 3 / 4 5 6 / 7 8 _ : tiles 2 and 1 swap in their goal row.
        let s = state("213456780");
        assert_eq!(linear_conflicts(&s, &goal), 1);
        assert_eq!(manhattan_linear_conflict(&s, &goal), 4);
    }

    #[test]
    fn test_linear_conflict_reversed_row_counts_two_tiles() {
        let goal = State::solved();
        // 3 2 1 in the top row: two tiles leave, not one per conflicting pair.
        let s = state("321456780");
        assert_eq!(linear_conflicts(&s, &goal), 2);
        assert_eq!(manhattan_linear_conflict(&s, &goal), 8);
    }

    #[test]
    fn test_linear_conflict_column() {
        let goal = State::solved();
        // 4 above 1 in the first column.
        let s = state("423156780");
        assert_eq!(linear_conflicts(&s, &goal), 1);
    }

    #[test]
    fn test_linear_conflict_none_when_out_of_line() {
        let goal = State::solved();
        assert_eq!(linear_conflicts(&state("123456708"), &goal), 0);
        assert_eq!(linear_conflicts(&state("265087431"), &goal), 0);
    }

    #[test]
    fn test_dominance_pointwise() {
        let goal = State::solved();
        for s in ["265087431", "813402765", "528417036", "867254301", "413726058"] {
            let s = state(s);
            let misplaced = HeuristicKind::Misplaced.estimate(&s, &goal);
            let manhattan = HeuristicKind::Manhattan.estimate(&s, &goal);
            let conflict = HeuristicKind::LinearConflict.estimate(&s, &goal);
            assert!(misplaced <= manhattan);
            assert!(manhattan <= conflict);
        }
    }

    #[test]
    fn test_serde_names() {
        let kind: HeuristicKind = serde_yaml::from_str("linear-conflict").unwrap();
        assert_eq!(kind, HeuristicKind::LinearConflict);
        assert_eq!(HeuristicKind::LinearConflict.to_string(), "linear-conflict");
    }
}
