mod astar;

pub use astar::{AStarEngine, EngineStatus};
