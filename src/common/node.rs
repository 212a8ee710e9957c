use super::state::{successors, State};
use crate::heuristic::HeuristicKind;

use std::cmp::Ordering;

/// Handle into a [`NodeArena`].
pub type NodeId = usize;

/// A node of the search tree. Never mutated once pushed into the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode {
    pub state: State,
    pub parent: Option<NodeId>,
    pub g_cost: usize,
    pub h_cost: f64,
}

impl SearchNode {
    pub fn f_cost(&self) -> f64 {
        self.g_cost as f64 + self.h_cost
    }
}

pub fn make_root(start: State, goal: &State, heuristic: HeuristicKind) -> SearchNode {
    SearchNode {
        state: start,
        parent: None,
        g_cost: 0,
        h_cost: heuristic.estimate(&start, goal),
    }
}

/// Children of the node stored at `id`, in legal-move order.
pub fn expand(
    node: &SearchNode,
    id: NodeId,
    goal: &State,
    heuristic: HeuristicKind,
) -> Vec<SearchNode> {
    successors(&node.state)
        .map(|(_, state)| SearchNode {
            state,
            parent: Some(id),
            g_cost: node.g_cost + 1,
            h_cost: heuristic.estimate(&state, goal),
        })
        .collect()
}

/// Owns every node created during one search. Parents are referenced by
/// index so the tree never owns itself.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// States from the root to `terminal`, both inclusive.
pub fn reconstruct_path(arena: &NodeArena, terminal: NodeId) -> Vec<State> {
    let mut path = vec![arena.get(terminal).state];
    let mut current = terminal;
    while let Some(parent) = arena.get(current).parent {
        path.push(arena.get(parent).state);
        current = parent;
    }
    path.reverse();
    path
}

/// Frontier entry, ordered by `(f, g, sequence)` ascending.
#[derive(Clone, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) f_cost: f64,
    pub(crate) g_cost: usize,
    pub(crate) sequence: usize,
    pub(crate) node: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then_with(|| self.g_cost.cmp(&other.g_cost))
            // Sequence numbers are unique, so no two entries compare equal.
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
