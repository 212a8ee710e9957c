use crate::common::{
    expand, is_goal, make_root, reconstruct_path, NodeArena, NodeId, OpenEntry, State,
};
use crate::heuristic::HeuristicKind;
use crate::stat::Stats;

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
}

impl EngineStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineStatus::Succeeded | EngineStatus::Failed)
    }
}

/// Graph-search A* over puzzle states.
///
/// A state is expanded at most once. That is sound only because every move
/// costs 1 and the heuristics are consistent, so the first pop of a state
/// carries its shortest distance.
pub struct AStarEngine {
    goal: State,
    heuristic: HeuristicKind,
    arena: NodeArena,
    open_list: BTreeSet<OpenEntry>,
    closed_list: HashSet<State>,
    sequence: usize,
    status: EngineStatus,
    terminal: Option<NodeId>,
    started: Option<Instant>,
    stats: Stats,
}

impl AStarEngine {
    pub fn new(start: State, goal: State, heuristic: HeuristicKind) -> Self {
        let mut engine = AStarEngine {
            goal,
            heuristic,
            arena: NodeArena::new(),
            open_list: BTreeSet::new(),
            closed_list: HashSet::new(),
            sequence: 0,
            status: EngineStatus::Ready,
            terminal: None,
            started: None,
            stats: Stats::default(),
        };
        let root = make_root(start, &goal, heuristic);
        let root_id = engine.arena.push(root);
        engine.push_open(root_id);
        engine
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic
    }

    /// Snapshot of the counters. Time keeps running until a terminal state.
    pub fn stats(&self) -> Stats {
        let mut stats = self.stats.clone();
        if let (Some(started), false) = (self.started, self.status.is_terminal()) {
            stats.time_us = started.elapsed().as_micros() as u64;
        }
        stats
    }

    /// Start to goal inclusive, once the search has succeeded.
    pub fn path(&self) -> Option<Vec<State>> {
        self.terminal.map(|id| reconstruct_path(&self.arena, id))
    }

    fn push_open(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        self.open_list.insert(OpenEntry {
            f_cost: node.f_cost(),
            g_cost: node.g_cost,
            sequence: self.sequence,
            node: id,
        });
        self.sequence += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.open_list.len());
    }

    fn finish(&mut self, status: EngineStatus) {
        self.status = status;
        if let Some(started) = self.started {
            self.stats.time_us = started.elapsed().as_micros() as u64;
        }
    }

    /// Pop one frontier entry. Terminal states are sticky.
    pub fn step(&mut self) -> EngineStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        if self.status == EngineStatus::Ready {
            self.started = Some(Instant::now());
            self.status = EngineStatus::Running;
        }

        let Some(current) = self.open_list.pop_first() else {
            debug!(
                "frontier exhausted after {} expansions",
                self.stats.nodes_expanded
            );
            self.finish(EngineStatus::Failed);
            return self.status;
        };

        let node = self.arena.get(current.node).clone();

        // Stale duplicate of a state that has already been expanded.
        if self.closed_list.contains(&node.state) {
            self.stats.stale_pops += 1;
            return self.status;
        }

        if is_goal(&node.state, &self.goal) {
            debug!(
                "reach goal with cost {} after {} expansions",
                node.g_cost, self.stats.nodes_expanded
            );
            self.terminal = Some(current.node);
            self.finish(EngineStatus::Succeeded);
            return self.status;
        }

        trace!("expand node: {:?} g {} h {}", node.state, node.g_cost, node.h_cost);
        self.closed_list.insert(node.state);
        self.stats.nodes_expanded += 1;

        for child in expand(&node, current.node, &self.goal, self.heuristic) {
            if self.closed_list.contains(&child.state) {
                continue;
            }
            let child_id = self.arena.push(child);
            self.push_open(child_id);
            self.stats.nodes_generated += 1;
        }

        self.status
    }

    #[instrument(skip_all, name = "a_star", fields(heuristic = %self.heuristic), level = "debug")]
    pub fn run(&mut self) -> EngineStatus {
        while !self.step().is_terminal() {}
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{move_between, Move};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init();
    }

    fn state(s: &str) -> State {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_is_goal() {
        init_tracing();
        let goal = State::solved();
        let mut engine = AStarEngine::new(goal, goal, HeuristicKind::Manhattan);
        assert_eq!(engine.status(), EngineStatus::Ready);
        assert_eq!(engine.step(), EngineStatus::Succeeded);
        assert_eq!(engine.path(), Some(vec![goal]));
        assert_eq!(engine.stats().nodes_expanded, 0);
    }

    #[test]
    fn test_step_transitions() {
        init_tracing();
        let mut engine =
            AStarEngine::new(state("123456078"), State::solved(), HeuristicKind::Misplaced);
        assert_eq!(engine.status(), EngineStatus::Ready);
        assert_eq!(engine.step(), EngineStatus::Running);
        assert_eq!(engine.path(), None);
        assert_eq!(engine.run(), EngineStatus::Succeeded);
        // Terminal state does not change.
        assert_eq!(engine.step(), EngineStatus::Succeeded);
    }

    #[test]
    fn test_two_moves() {
        init_tracing();
        let start = state("123456078");
        let goal = State::solved();
        for heuristic in HeuristicKind::ALL {
            let mut engine = AStarEngine::new(start, goal, heuristic);
            assert_eq!(engine.run(), EngineStatus::Succeeded);
            let path = engine.path().unwrap();
            assert_eq!(path.len(), 3, "{heuristic}");
            assert_eq!(move_between(&path[0], &path[1]), Some(Move::Right));
            assert_eq!(move_between(&path[1], &path[2]), Some(Move::Right));
            assert_eq!(engine.stats().nodes_expanded, 2);
        }
    }

    #[test]
    fn test_unsolvable_fails() {
        init_tracing();
        let start = state("213456780");
        let mut engine = AStarEngine::new(start, State::solved(), HeuristicKind::LinearConflict);
        assert_eq!(engine.run(), EngineStatus::Failed);
        assert_eq!(engine.path(), None);

        // Half of the 9! permutations are reachable from any state.
        let stats = engine.stats();
        assert_eq!(stats.nodes_expanded, 181_440);
        assert!(stats.max_frontier > 0);
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        init_tracing();
        let mut engine =
            AStarEngine::new(state("265087431"), State::solved(), HeuristicKind::Misplaced);
        assert_eq!(engine.run(), EngineStatus::Succeeded);
        let stats = engine.stats();
        assert!(stats.stale_pops > 0);
        assert!(stats.nodes_generated >= stats.nodes_expanded);
    }
}
