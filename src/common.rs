mod node;
mod state;

pub(crate) use node::OpenEntry;
pub use node::{expand, make_root, reconstruct_path, NodeArena, NodeId, SearchNode};
pub use state::{
    apply, has_even_parity, inversions, is_goal, is_solvable, legal_moves, move_between,
    successors, Move, State, CELLS, SIDE,
};
