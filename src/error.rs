use crate::common::{Move, State};

/// Faults that abort a call. Search exhaustion is not one of them, it is
/// reported through [`crate::solver::SolveOutcome::NoSolution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// `apply` was asked to slide a tile that does not exist.
    IllegalMove { state: State, mv: Move },
    /// Input is not a permutation of 0..=8.
    MalformedState { detail: String },
}

impl std::fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalMove { state, mv } => {
                write!(f, "illegal move {mv} for state {state:?}")
            }
            Self::MalformedState { detail } => write!(f, "malformed state: {detail}"),
        }
    }
}

impl std::error::Error for PuzzleError {}
