/// Adversary AI: mode state machine and A* steering.
///
/// Three modes, one field per adversary:
///   1. **ChaseScatter**: chase with a per-personality target, except during
///      the periodic scatter window when everyone heads for their corner.
///   2. **Scared**: flee to the scatter corner at reduced speed.
///   3. **Eaten**: race back to spawn; revives on arrival.
///
/// Mode changes are pushed in from outside (`frighten_all`, `calm_all`,
/// `mark_eaten`) except the revive, which happens once an eaten adversary
/// is back at spawn.
///
/// Steering: an adversary holds at most one waypoint (the next cell
/// center). With no waypoint it picks a target and plans a path this tick
/// without moving; with one it walks straight at it.

use tracing::trace;

use super::entity::{cell_center, cell_of, Adversary, Cell, Direction, Mode, Personality, Vec2};
use super::maze::MazeGrid;
use super::pathfinding;

const EATEN_SPEED: f32 = 2.0;
const SCARED_SPEED: f32 = 0.7;

/// Distance from spawn at which an eaten adversary counts as home.
pub const REVIVE_TOLERANCE: f32 = 0.1;
/// Ambusher extrapolation factor along leader -> player.
const AMBUSH_REACH: f32 = 2.0;
/// Flanker look-ahead, tried in order.
const FLANK_STEPS: [i32; 2] = [2, 1];
/// Shy adversary retreats when closer than this to the player.
const SHY_RADIUS: f32 = 8.0;

pub fn speed_multiplier(mode: Mode) -> f32 {
    match mode {
        Mode::ChaseScatter => 1.0,
        Mode::Scared => SCARED_SPEED,
        Mode::Eaten => EATEN_SPEED,
    }
}

/// Is the periodic scatter window open at `elapsed` seconds?
///
/// Open while `(t² mod 100)^1.2 < 10`, which gives an irregular on/off
/// pattern: long windows early, short flickers later.
pub fn in_scatter_window(elapsed: f64) -> bool {
    (elapsed * elapsed).rem_euclid(100.0).powf(1.2) < 10.0
}

/// Everything target selection needs to know about the rest of the world.
pub struct TargetContext<'a> {
    pub maze: &'a MazeGrid,
    pub player_pos: Vec2,
    pub player_dir: Direction,
    /// Adversary 0's position, already updated this tick.
    pub leader_pos: Vec2,
    pub elapsed: f64,
}

/// Pick the cell this adversary wants to reach.
pub fn select_target(adv: &Adversary, ctx: &TargetContext) -> Cell {
    match adv.mode {
        Mode::Eaten => cell_of(adv.spawn),
        Mode::Scared => adv.scatter_corner,
        Mode::ChaseScatter if in_scatter_window(ctx.elapsed) => adv.scatter_corner,
        Mode::ChaseScatter => chase_target(adv, ctx),
    }
}

fn chase_target(adv: &Adversary, ctx: &TargetContext) -> Cell {
    let player_cell = cell_of(ctx.player_pos);
    match adv.personality() {
        Personality::Pursuer => player_cell,
        Personality::Ambusher => {
            let ahead = ctx.leader_pos + (ctx.player_pos - ctx.leader_pos) * AMBUSH_REACH;
            let cell = cell_of(ahead);
            match ctx.maze.tile_at(cell) {
                Some(tile) if tile.is_pathable() => cell,
                _ => player_cell,
            }
        }
        Personality::Flanker => {
            let (dx, dy) = ctx.player_dir.delta();
            FLANK_STEPS
                .iter()
                .map(|&n| (player_cell.0 + dx * n, player_cell.1 + dy * n))
                .find(|&cell| ctx.maze.is_pathable(cell))
                .unwrap_or(player_cell)
        }
        Personality::Shy => {
            if adv.pos.distance(ctx.player_pos) < SHY_RADIUS {
                adv.scatter_corner
            } else {
                player_cell
            }
        }
    }
}

// ── Mode transitions ──

/// Power pickup eaten: every adversary not already eaten turns scared.
/// Returns how many flipped.
pub fn frighten_all(adversaries: &mut [Adversary]) -> usize {
    let mut flipped = 0;
    for adv in adversaries.iter_mut() {
        if adv.mode != Mode::Eaten {
            if adv.mode == Mode::ChaseScatter {
                flipped += 1;
            }
            adv.mode = Mode::Scared;
        }
    }
    flipped
}

/// Scared countdown ran out.
pub fn calm_all(adversaries: &mut [Adversary]) {
    for adv in adversaries.iter_mut() {
        if adv.mode == Mode::Scared {
            adv.mode = Mode::ChaseScatter;
        }
    }
}

/// Player caught a scared adversary. Returns false for any other mode.
pub fn mark_eaten(adv: &mut Adversary) -> bool {
    if adv.mode != Mode::Scared {
        return false;
    }
    adv.mode = Mode::Eaten;
    true
}

fn try_revive(adv: &mut Adversary) -> bool {
    if adv.mode == Mode::Eaten && adv.pos.distance(adv.spawn) < REVIVE_TOLERANCE {
        adv.mode = Mode::ChaseScatter;
        return true;
    }
    false
}

// ── Per-tick update ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Walking toward the held waypoint.
    Moving,
    /// Reached the waypoint; will replan next tick.
    Arrived,
    /// Eaten and back at spawn: now ChaseScatter.
    Revived,
    /// No waypoint: planned a new one.
    Replanned,
    /// No waypoint to take: already on the target, or it is unreachable.
    /// Retries next tick.
    Idle,
}

pub fn update_adversary(
    adv: &mut Adversary,
    ctx: &TargetContext,
    dt: f32,
    base_speed: f32,
) -> Outcome {
    if let Some(waypoint) = adv.waypoint {
        let travel = base_speed * speed_multiplier(adv.mode) * dt;
        let delta = waypoint - adv.pos;
        let remaining = delta.length();
        if remaining <= travel {
            adv.pos = waypoint;
            adv.waypoint = None;
            return if try_revive(adv) { Outcome::Revived } else { Outcome::Arrived };
        }
        adv.pos = adv.pos + delta * (travel / remaining);
        return Outcome::Moving;
    }

    if try_revive(adv) {
        return Outcome::Revived;
    }

    let target = select_target(adv, ctx);
    match pathfinding::find_path(ctx.maze, adv.cell(), target) {
        Some(path) if path.len() >= 2 => {
            adv.waypoint = Some(cell_center(path[1]));
            Outcome::Replanned
        }
        // Already standing on the target
        Some(_) => Outcome::Idle,
        None => {
            trace!(id = adv.id, ?target, "no path");
            Outcome::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::maze::CLASSIC;

    fn classic() -> MazeGrid {
        MazeGrid::from_layout(&CLASSIC)
    }

    fn adversary(id: usize, x: f32, y: f32) -> Adversary {
        let mut a = Adversary::new(id, MazeGrid::spawn_point(CLASSIC.adversary_spawns[id]), CLASSIC.scatter_corners[id]);
        a.pos = Vec2::new(x, y);
        a
    }

    fn ctx<'a>(maze: &'a MazeGrid, player: Vec2, dir: Direction, leader: Vec2, elapsed: f64) -> TargetContext<'a> {
        TargetContext { maze, player_pos: player, player_dir: dir, leader_pos: leader, elapsed }
    }

    // Outside the scatter window: 3² = 9, 9^1.2 ≈ 14
    const CHASE_TIME: f64 = 3.0;

    #[test]
    fn scatter_window_samples() {
        assert!(in_scatter_window(0.0));
        assert!(in_scatter_window(2.0));
        assert!(!in_scatter_window(3.0));
        assert!(in_scatter_window(10.0));
        assert!(!in_scatter_window(5.0));
    }

    #[test]
    fn speed_multipliers() {
        assert_eq!(speed_multiplier(Mode::ChaseScatter), 1.0);
        assert_eq!(speed_multiplier(Mode::Scared), 0.7);
        assert_eq!(speed_multiplier(Mode::Eaten), 2.0);
    }

    #[test]
    fn pursuer_targets_player_cell() {
        let m = classic();
        let a = adversary(0, 13.5, 10.5);
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::Right, a.pos, CHASE_TIME);
        assert_eq!(select_target(&a, &c), (6, 5));
    }

    #[test]
    fn ambusher_mirrors_through_leader() {
        let m = classic();
        let a = adversary(1, 13.5, 13.5);
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::None, Vec2::new(1.5, 5.5), CHASE_TIME);
        assert_eq!(select_target(&a, &c), (11, 5));
    }

    #[test]
    fn ambusher_falls_back_on_wall_or_off_grid() {
        let m = classic();
        let a = adversary(1, 13.5, 13.5);
        // (11,9) is a wall
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::None, Vec2::new(1.5, 1.5), CHASE_TIME);
        assert_eq!(select_target(&a, &c), (6, 5));
        // far off the grid
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::None, Vec2::new(26.5, 27.5), CHASE_TIME);
        assert_eq!(select_target(&a, &c), (6, 5));
    }

    #[test]
    fn flanker_looks_two_then_one_ahead() {
        let m = classic();
        let a = adversary(2, 11.5, 13.5);
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::Right, a.pos, CHASE_TIME);
        assert_eq!(select_target(&a, &c), (8, 5));
        // (13,1) is a wall, (12,1) is open
        let c = ctx(&m, Vec2::new(11.5, 1.5), Direction::Right, a.pos, CHASE_TIME);
        assert_eq!(select_target(&a, &c), (12, 1));
        // both ahead are walls
        let c = ctx(&m, Vec2::new(3.5, 5.5), Direction::Down, a.pos, CHASE_TIME);
        assert_eq!(select_target(&a, &c), (3, 5));
    }

    #[test]
    fn shy_retreats_when_close() {
        let m = classic();
        let near = adversary(3, 6.5, 1.5);
        let far = adversary(3, 26.5, 27.5);
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::None, Vec2::new(13.5, 10.5), CHASE_TIME);
        assert_eq!(select_target(&near, &c), CLASSIC.scatter_corners[3]);
        assert_eq!(select_target(&far, &c), (6, 5));
    }

    #[test]
    fn scatter_window_sends_everyone_to_corners() {
        let m = classic();
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::Right, Vec2::new(1.5, 5.5), 0.0);
        for id in 0..4 {
            let a = adversary(id, 13.5, 13.5);
            assert_eq!(select_target(&a, &c), CLASSIC.scatter_corners[id]);
        }
    }

    #[test]
    fn scared_and_eaten_targets() {
        let m = classic();
        let c = ctx(&m, Vec2::new(6.5, 5.5), Direction::Right, Vec2::new(1.5, 5.5), CHASE_TIME);
        let mut a = adversary(0, 6.5, 8.5);
        a.mode = Mode::Scared;
        assert_eq!(select_target(&a, &c), CLASSIC.scatter_corners[0]);
        a.mode = Mode::Eaten;
        assert_eq!(select_target(&a, &c), CLASSIC.adversary_spawns[0]);
    }

    #[test]
    fn frighten_skips_eaten() {
        let mut advs: Vec<Adversary> = (0..4).map(|id| adversary(id, 1.5, 1.5)).collect();
        advs[1].mode = Mode::Scared;
        advs[2].mode = Mode::Eaten;
        assert_eq!(frighten_all(&mut advs), 2);
        let modes: Vec<Mode> = advs.iter().map(|a| a.mode).collect();
        assert_eq!(modes, vec![Mode::Scared, Mode::Scared, Mode::Eaten, Mode::Scared]);

        calm_all(&mut advs);
        let modes: Vec<Mode> = advs.iter().map(|a| a.mode).collect();
        assert_eq!(modes, vec![Mode::ChaseScatter, Mode::ChaseScatter, Mode::Eaten, Mode::ChaseScatter]);
    }

    #[test]
    fn only_scared_can_be_eaten() {
        let mut a = adversary(0, 1.5, 1.5);
        assert!(!mark_eaten(&mut a));
        assert_eq!(a.mode, Mode::ChaseScatter);
        a.mode = Mode::Scared;
        assert!(mark_eaten(&mut a));
        assert_eq!(a.mode, Mode::Eaten);
    }

    fn hall() -> MazeGrid {
        MazeGrid::parse(&["XXXXXXX", "X     X", "XXXXXXX"])
    }

    fn hall_adversary(mode: Mode) -> Adversary {
        let mut a = Adversary::new(0, Vec2::new(3.5, 1.5), (1, 1));
        a.pos = Vec2::new(1.5, 1.5);
        a.mode = mode;
        a
    }

    #[test]
    fn replan_then_walk_then_arrive() {
        let m = hall();
        let mut a = hall_adversary(Mode::ChaseScatter);
        let c = ctx(&m, Vec2::new(5.5, 1.5), Direction::None, a.pos, CHASE_TIME);

        assert_eq!(update_adversary(&mut a, &c, 0.1, 5.0), Outcome::Replanned);
        assert_eq!(a.waypoint, Some(Vec2::new(2.5, 1.5)));
        assert_eq!(a.pos, Vec2::new(1.5, 1.5));

        assert_eq!(update_adversary(&mut a, &c, 0.1, 5.0), Outcome::Moving);
        assert!((a.pos.x - 2.0).abs() < 1e-5);

        assert_eq!(update_adversary(&mut a, &c, 0.2, 5.0), Outcome::Arrived);
        assert_eq!(a.pos, Vec2::new(2.5, 1.5));
        assert!(a.waypoint.is_none());
    }

    #[test]
    fn eaten_moves_double_and_revives_at_spawn() {
        let m = hall();
        let mut a = hall_adversary(Mode::Eaten);
        a.pos = Vec2::new(2.5, 1.5);
        a.waypoint = Some(Vec2::new(3.5, 1.5));
        let c = ctx(&m, Vec2::new(5.5, 1.5), Direction::None, a.pos, CHASE_TIME);

        assert_eq!(update_adversary(&mut a, &c, 0.05, 4.0), Outcome::Moving);
        assert!((a.pos.x - 2.9).abs() < 1e-5);

        assert_eq!(update_adversary(&mut a, &c, 0.1, 4.0), Outcome::Revived);
        assert_eq!(a.mode, Mode::ChaseScatter);
        assert_eq!(a.pos, a.spawn);
    }

    #[test]
    fn eaten_at_spawn_without_waypoint_revives() {
        let m = hall();
        let mut a = hall_adversary(Mode::Eaten);
        a.pos = a.spawn;
        let c = ctx(&m, Vec2::new(5.5, 1.5), Direction::None, a.pos, CHASE_TIME);
        assert_eq!(update_adversary(&mut a, &c, 0.1, 5.0), Outcome::Revived);
        assert_eq!(a.mode, Mode::ChaseScatter);
    }

    #[test]
    fn standing_on_target_holds_still() {
        let m = hall();
        let mut a = hall_adversary(Mode::Scared);
        let c = ctx(&m, Vec2::new(5.5, 1.5), Direction::None, a.pos, CHASE_TIME);
        // Scared target is the corner (1,1), which is where it stands
        assert_eq!(update_adversary(&mut a, &c, 0.1, 5.0), Outcome::Idle);
        assert!(a.waypoint.is_none());
        assert_eq!(a.pos, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn scared_moves_slower() {
        let m = hall();
        let mut a = hall_adversary(Mode::Scared);
        a.waypoint = Some(Vec2::new(2.5, 1.5));
        let c = ctx(&m, Vec2::new(5.5, 1.5), Direction::None, a.pos, CHASE_TIME);
        update_adversary(&mut a, &c, 0.1, 5.0);
        assert!((a.pos.x - 1.85).abs() < 1e-5);
    }

    #[test]
    fn unreachable_target_idles() {
        let m = MazeGrid::parse(&["XXXXXXX", "X  X  X", "XXXXXXX"]);
        let mut a = Adversary::new(0, Vec2::new(1.5, 1.5), (1, 1));
        let c = ctx(&m, Vec2::new(5.5, 1.5), Direction::None, a.pos, CHASE_TIME);
        assert_eq!(update_adversary(&mut a, &c, 0.1, 5.0), Outcome::Idle);
        assert!(a.waypoint.is_none());
        assert_eq!(a.pos, Vec2::new(1.5, 1.5));
    }
}
