use crate::error::PuzzleError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

/// Direction the blank travels. `Up` means the tile above the blank slides
/// down into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order. The frontier tie-break depends on it, keep it fixed.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn delta(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A board: `tiles[p]` is the value at row `p / 3`, column `p % 3`, 0 is the blank.
///
/// Always a permutation of 0..=8; every constructor validates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct State {
    tiles: [u8; CELLS],
}

impl State {
    pub fn new(tiles: [u8; CELLS]) -> Result<Self, PuzzleError> {
        let mut seen = [false; CELLS];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or_else(|| PuzzleError::MalformedState {
                    detail: format!("value {value} out of range 0..=8 in {tiles:?}"),
                })?;
            if *slot {
                return Err(PuzzleError::MalformedState {
                    detail: format!("value {value} appears twice in {tiles:?}"),
                });
            }
            *slot = true;
        }
        Ok(State { tiles })
    }

    /// The conventional goal `(1, 2, 3, 4, 5, 6, 7, 8, 0)`.
    pub fn solved() -> Self {
        State::from_tiles_unchecked([1, 2, 3, 4, 5, 6, 7, 8, 0])
    }

    /// Only for literals that are known permutations.
    pub(crate) const fn from_tiles_unchecked(tiles: [u8; CELLS]) -> Self {
        State { tiles }
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    pub fn blank(&self) -> usize {
        self.position_of(0)
    }

    /// Index holding `value`. Total because the state is a permutation.
    pub fn position_of(&self, value: u8) -> usize {
        self.tiles
            .iter()
            .position(|&v| v == value)
            .unwrap_or_default()
    }

    /// `positions()[v]` is the index of value `v`.
    pub fn positions(&self) -> [usize; CELLS] {
        let mut positions = [0; CELLS];
        for (index, &value) in self.tiles.iter().enumerate() {
            positions[value as usize] = index;
        }
        positions
    }

    /// Index the blank moves to, if it stays on the board.
    fn target(&self, mv: Move) -> Option<usize> {
        let blank = self.blank();
        let (dr, dc) = mv.delta();
        let row = (blank / SIDE) as isize + dr;
        let col = (blank % SIDE) as isize + dc;
        if row < 0 || col < 0 || row >= SIDE as isize || col >= SIDE as isize {
            return None;
        }
        Some(row as usize * SIDE + col as usize)
    }

    fn swap_blank(&self, target: usize) -> State {
        let mut tiles = self.tiles;
        tiles.swap(self.blank(), target);
        State { tiles }
    }
}

impl TryFrom<Vec<u8>> for State {
    type Error = PuzzleError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        let tiles: [u8; CELLS] =
            values
                .as_slice()
                .try_into()
                .map_err(|_| PuzzleError::MalformedState {
                    detail: format!("expected {CELLS} values, got {}", values.len()),
                })?;
        State::new(tiles)
    }
}

impl From<State> for Vec<u8> {
    fn from(state: State) -> Self {
        state.tiles.to_vec()
    }
}

impl FromStr for State {
    type Err = PuzzleError;

    /// Accepts `"2,6,5,0,8,7,4,3,1"`, `"2 6 5 0 8 7 4 3 1"` or `"265087431"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = if s.contains(|c: char| c == ',' || c.is_whitespace()) {
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .collect()
        } else {
            s.split("").filter(|part| !part.is_empty()).collect()
        };

        let values = parts
            .iter()
            .map(|part| {
                part.parse::<u8>().map_err(|_| PuzzleError::MalformedState {
                    detail: format!("'{part}' is not a tile value"),
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;
        State::try_from(values)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.tiles.iter().map(|v| v.to_string()).collect();
        write!(f, "({})", values.join(","))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(SIDE) {
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { " ".to_string() } else { v.to_string() })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Legal successors in `Move::ALL` order.
pub fn successors(state: &State) -> impl Iterator<Item = (Move, State)> + '_ {
    Move::ALL.into_iter().filter_map(move |mv| {
        state
            .target(mv)
            .map(|target| (mv, state.swap_blank(target)))
    })
}

pub fn legal_moves(state: &State) -> Vec<Move> {
    successors(state).map(|(mv, _)| mv).collect()
}

pub fn apply(state: &State, mv: Move) -> Result<State, PuzzleError> {
    state
        .target(mv)
        .map(|target| state.swap_blank(target))
        .ok_or(PuzzleError::IllegalMove { state: *state, mv })
}

pub fn is_goal(state: &State, goal: &State) -> bool {
    state == goal
}

/// Pairs `i < j` of non-blank tiles with `tiles[i] > tiles[j]`.
pub fn inversions(state: &State) -> usize {
    let tiles = state.tiles();
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .map(|(i, &value)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < value)
                .count()
        })
        .sum()
}

pub fn has_even_parity(state: &State) -> bool {
    inversions(state) % 2 == 0
}

/// Even inversion count. Only meaningful when `goal` itself has even parity,
/// as `State::solved()` does; `goal` is not inspected. Callers that accept
/// arbitrary goals check `has_even_parity(goal)` first.
pub fn is_solvable(state: &State, _goal: &State) -> bool {
    has_even_parity(state)
}

/// The single move taking `from` to `to`, if they are adjacent.
pub fn move_between(from: &State, to: &State) -> Option<Move> {
    successors(from)
        .find(|(_, next)| next == to)
        .map(|(mv, _)| mv)
}
