/// Maze-chase simulation core.
///
/// `domain` holds the pure rules (maze, movement, pathfinding, adversary AI),
/// `sim` drives them one tick at a time, `config` loads the tunables.

pub mod config;
pub mod domain;
pub mod sim;
