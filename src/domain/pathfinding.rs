/// A* over the maze graph.
///
/// Nodes are cells, edges go to `MazeGrid::pathable_neighbors` (4-way,
/// non-wrapping), every edge costs 1, heuristic is Euclidean distance.
/// The search visits each cell at most once, so it terminates on any grid
/// and returns `None` when the goal is unreachable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::entity::Cell;
use super::maze::MazeGrid;

#[derive(Clone, Copy, Debug)]
struct Open {
    f: f32,
    g: u32,
    cell: Cell,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    // Reversed so `BinaryHeap` pops the lowest f first; ties prefer the
    // deeper node (closer to the goal).
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

fn heuristic(a: Cell, b: Cell) -> f32 {
    let dx = (a.0 - b.0) as f32;
    let dy = (a.1 - b.1) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest path from `start` to `goal`, both inclusive.
/// `None` if either end is off the grid, a wall, or unreachable.
pub fn find_path(maze: &MazeGrid, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !maze.is_pathable(start) || !maze.is_pathable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let width = maze.width();
    let index = |c: Cell| c.1 as usize * width + c.0 as usize;
    let cells = width * maze.height();

    let mut best_g: Vec<u32> = vec![u32::MAX; cells];
    let mut came_from: Vec<Option<Cell>> = vec![None; cells];
    let mut closed = vec![false; cells];
    let mut open = BinaryHeap::with_capacity(64);

    best_g[index(start)] = 0;
    open.push(Open { f: heuristic(start, goal), g: 0, cell: start });

    while let Some(Open { g, cell, .. }) = open.pop() {
        let i = index(cell);
        if closed[i] {
            continue;
        }
        closed[i] = true;

        if cell == goal {
            return Some(reconstruct(&came_from, index, goal));
        }

        for next in maze.pathable_neighbors(cell) {
            let j = index(next);
            if closed[j] {
                continue;
            }
            let ng = g + 1;
            if ng < best_g[j] {
                best_g[j] = ng;
                came_from[j] = Some(cell);
                open.push(Open { f: ng as f32 + heuristic(next, goal), g: ng, cell: next });
            }
        }
    }

    None
}

fn reconstruct(came_from: &[Option<Cell>], index: impl Fn(Cell) -> usize, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(prev) = came_from[index(cur)] {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}
