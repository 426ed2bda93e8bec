/// Player movement rules: truth-table driven.
///
/// Operates on continuous positions. Turns are only committed near a cell
/// center, so the player can never cut a corner through a wall.
///
/// ## Turn Truth Table
///
/// `want` = the new input if nonzero and not blocked, else the queued one.
/// ┌──────────────────────────────────────┬───────────────────────────────┐
/// │ Condition (priority order)            │ Result                        │
/// ├──────────────────────────────────────┼───────────────────────────────┤
/// │ cell at pos + want is Wall/Gate       │ ignored (queue untouched)     │
/// │ want parallel/anti-parallel to current│ turn now, clear queue         │
/// │ perpendicular offset in (0.4, 0.6)    │ snap to center, turn, clear   │
/// │ otherwise                             │ queue `want`                  │
/// └──────────────────────────────────────┴───────────────────────────────┘
///
/// "Perpendicular offset" is the fractional part of the coordinate on the
/// axis the actor is NOT about to move along. A stationary actor has no
/// current direction, so every turn from rest goes through the band check.
///
/// ## Travel
///
/// ┌──────────────────────────────────────┬───────────────────────────────┐
/// │ Condition                             │ Result                        │
/// ├──────────────────────────────────────┼───────────────────────────────┤
/// │ half a cell ahead is Wall/Gate        │ halt (direction = None)       │
/// │ next cell blocked, center ahead       │ advance to center, then halt  │
/// │ otherwise                             │ pos += dir * dt * speed, wrap │
/// └──────────────────────────────────────┴───────────────────────────────┘
///
/// Travel walks cell by cell so a long tick cannot tunnel into a wall.

use super::entity::{Direction, Player, Vec2};
use super::maze::MazeGrid;

/// Open interval of sub-cell offsets where a perpendicular turn is legal.
pub const ALIGN_MIN: f32 = 0.4;
pub const ALIGN_MAX: f32 = 0.6;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Turn {
    Blocked,
    Committed,
    Queued,
}

/// Advance the player by one tick.
pub fn advance_player(
    player: &mut Player,
    maze: &MazeGrid,
    dt: f32,
    intended: Direction,
    speed: f32,
) {
    resolve_turn(player, maze, intended);

    if !player.direction.is_none() && blocked_ahead(maze, player.pos, player.direction) {
        player.direction = Direction::None;
    }
    if player.direction.is_none() {
        return;
    }

    // At most one lap per tick.
    let lap = maze.width().max(maze.height()) as f32;
    let distance = (dt * speed).min(lap);
    if !(distance > 0.0) {
        return;
    }

    let (pos, halted) = travel(maze, player.pos, player.direction, distance);
    player.pos = pos;
    if halted {
        player.direction = Direction::None;
    }
}

/// Is the cell half a step ahead closed to the player?
pub fn blocked_ahead(maze: &MazeGrid, pos: Vec2, dir: Direction) -> bool {
    maze.tile_at_wrapped(pos + dir.vector() * 0.5).blocks_player()
}

fn resolve_turn(player: &mut Player, maze: &MazeGrid, intended: Direction) {
    if !intended.is_none() && try_turn(player, maze, intended) != Turn::Blocked {
        return;
    }
    if let Some(queued) = player.queued {
        try_turn(player, maze, queued);
    }
}

fn try_turn(player: &mut Player, maze: &MazeGrid, want: Direction) -> Turn {
    if maze.tile_at_wrapped(player.pos + want.vector()).blocks_player() {
        return Turn::Blocked;
    }

    if want.dot(player.direction) != 0 {
        player.direction = want;
        player.queued = None;
        return Turn::Committed;
    }

    let perp = if want.is_horizontal() { &mut player.pos.y } else { &mut player.pos.x };
    let offset = *perp - perp.floor();
    if offset > ALIGN_MIN && offset < ALIGN_MAX {
        *perp = perp.floor() + 0.5;
        player.direction = want;
        player.queued = None;
        Turn::Committed
    } else {
        player.queued = Some(want);
        Turn::Queued
    }
}

/// Move `distance` along `dir`, one cell boundary at a time.
/// Returns the new (wrapped) position and whether the actor halted on a
/// blocked cell center before using up the distance.
fn travel(maze: &MazeGrid, mut pos: Vec2, dir: Direction, mut remaining: f32) -> (Vec2, bool) {
    let horizontal = dir.is_horizontal();
    let sign: f32 = match dir {
        Direction::Right | Direction::Down => 1.0,
        Direction::Left | Direction::Up => -1.0,
        Direction::None => return (pos, false),
    };

    while remaining > 0.0 {
        let (axis, perp) = if horizontal { (pos.x, pos.y) } else { (pos.y, pos.x) };
        let floor = axis.floor();
        // Sitting exactly on a boundary while moving backwards = already in
        // the lower cell.
        let cell = if sign < 0.0 && axis == floor { floor - 1.0 } else { floor };
        let center = cell + 0.5;

        let probe_axis = center + sign;
        let probe = if horizontal { Vec2::new(probe_axis, perp) } else { Vec2::new(perp, probe_axis) };

        let (next_axis, used, halted) = if maze.tile_at_wrapped(probe).blocks_player() {
            let ahead = (center - axis) * sign;
            if ahead <= 0.0 {
                return (pos, true);
            }
            if remaining >= ahead {
                (center, ahead, remaining > ahead)
            } else {
                (axis + sign * remaining, remaining, false)
            }
        } else {
            let boundary = if sign > 0.0 { cell + 1.0 } else { cell };
            let to_boundary = (boundary - axis) * sign;
            if remaining >= to_boundary {
                (boundary, to_boundary, false)
            } else {
                (axis + sign * remaining, remaining, false)
            }
        };

        pos = if horizontal { Vec2::new(next_axis, perp) } else { Vec2::new(perp, next_axis) };
        pos = maze.wrap(pos);
        remaining -= used;
        if halted {
            return (pos, true);
        }
    }
    (pos, false)
}
