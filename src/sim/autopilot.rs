/// Demo autopilot: steers the player for headless runs.
///
/// BFS over player-passable cells (walls and gates excluded, seams
/// wrapped) toward the nearest remaining pickup. Two passes:
///   1. **Cautious**: cells near a ChaseScatter adversary are off limits.
///   2. **Reckless**: no danger filter, used when the cautious pass finds
///      nothing.
/// No reachable pickup at all returns `Direction::None`.

use std::collections::VecDeque;

use crate::domain::entity::{cell_center, Direction, Mode, Vec2};
use crate::domain::maze::MazeGrid;
use super::world::WorldState;

const DIRS: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

/// Cells whose center is closer than this to a chasing adversary are avoided.
const DANGER_RADIUS: f32 = 2.0;

pub fn choose_direction(world: &WorldState) -> Direction {
    let start = world.maze.wrapped_cell(world.player.pos);
    let threats: Vec<Vec2> = world
        .adversaries
        .iter()
        .filter(|a| a.mode == Mode::ChaseScatter)
        .map(|a| a.pos)
        .collect();

    let near_threat = |x: usize, y: usize| {
        let center = cell_center((x as i32, y as i32));
        threats.iter().any(|t| t.distance(center) < DANGER_RADIUS)
    };

    nearest_pickup(&world.maze, start, near_threat)
        .or_else(|| nearest_pickup(&world.maze, start, |_, _| false))
        .unwrap_or(Direction::None)
}

/// First step of a shortest path from `start` to any consumable.
fn nearest_pickup(
    maze: &MazeGrid,
    start: (usize, usize),
    avoid: impl Fn(usize, usize) -> bool,
) -> Option<Direction> {
    let (width, height) = (maze.width(), maze.height());
    if width == 0 || height == 0 {
        return None;
    }
    let tiles = maze.rows();
    let mut visited = vec![vec![false; width]; height];
    visited[start.1][start.0] = true;

    let mut queue: VecDeque<(usize, usize, Direction)> = VecDeque::with_capacity(256);

    for &dir in &DIRS {
        if let Some((nx, ny)) = neighbor(maze, start.0, start.1, dir) {
            if avoid(nx, ny) { continue; }
            if tiles[ny][nx].is_consumable() { return Some(dir); }
            visited[ny][nx] = true;
            queue.push_back((nx, ny, dir));
        }
    }

    while let Some((cx, cy, first)) = queue.pop_front() {
        for &dir in &DIRS {
            if let Some((nx, ny)) = neighbor(maze, cx, cy, dir) {
                if visited[ny][nx] || avoid(nx, ny) { continue; }
                if tiles[ny][nx].is_consumable() { return Some(first); }
                visited[ny][nx] = true;
                queue.push_back((nx, ny, first));
            }
        }
    }

    None
}

/// Wrapped neighbor the player may enter.
fn neighbor(maze: &MazeGrid, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
    let (dx, dy) = dir.delta();
    let nx = (x as i32 + dx).rem_euclid(maze.width() as i32) as usize;
    let ny = (y as i32 + dy).rem_euclid(maze.height() as i32) as usize;
    if maze.rows()[ny][nx].blocks_player() {
        None
    } else {
        Some((nx, ny))
    }
}
