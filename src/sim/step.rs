/// The step function: advances the world by one tick.
///
/// Phase dispatch:
///   - Start / Lose / Win  -> wait for the start trigger, then `reset_game`.
///   - Playing             -> the full tick below.
///   - Dying               -> shrink the player, then respawn or lose.
///
/// Playing order:
///   1. Player movement
///   2. Adversary movement (id order; id 1 sees id 0's new position)
///   3. Pickup consumption
///   4. Player / adversary contact (a death ends the tick here)
///   5. Timer updates (elapsed time, scared countdown)
///   6. Win check
///
/// Every (phase, input) pair has an outcome; anything not listed is a no-op,
/// e.g. a start trigger while Playing.

use tracing::{debug, info};

use crate::domain::ai::{self, Outcome, TargetContext};
use crate::domain::entity::{Direction, FrameInput, Mode};
use crate::domain::movement;
use crate::domain::tile::Tile;
use super::event::GameEvent;
use super::world::{Phase, WorldState, ADVERSARY_COUNT};

/// Player/adversary centers closer than this touch.
pub const CONTACT_DISTANCE: f32 = 0.5;
/// Combo doubling stops after this many catches.
const MAX_COMBO_SHIFT: u32 = 4;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: FrameInput) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    let dt = if input.dt.is_finite() && input.dt > 0.0 { input.dt } else { 0.0 };

    match world.phase {
        Phase::Start | Phase::Lose | Phase::Win => {
            if input.start {
                start_game(world, &mut events);
            }
        }
        Phase::Playing => play(world, dt, input.direction, &mut events),
        Phase::Dying => resolve_dying(world, dt, &mut events),
    }

    events
}

fn play(world: &mut WorldState, dt: f32, direction: Direction, events: &mut Vec<GameEvent>) {
    world.tick += 1;

    resolve_player_movement(world, dt, direction);
    resolve_adversary_movement(world, dt, events);
    let refreshed = resolve_pickup(world, events);
    if resolve_adversary_contact(world, events) { return; }
    resolve_timers(world, dt, refreshed, events);
    resolve_win(world, events);
}

fn start_game(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    world.reset_game();
    world.phase = Phase::Playing;
    info!(lives = world.lives, "game started");
    events.push(GameEvent::GameStarted);
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn resolve_player_movement(world: &mut WorldState, dt: f32, direction: Direction) {
    movement::advance_player(
        &mut world.player,
        &world.maze,
        dt,
        direction,
        world.config.speed.player,
    );
}

fn resolve_adversary_movement(world: &mut WorldState, dt: f32, events: &mut Vec<GameEvent>) {
    let speed = world.config.speed.adversary;

    for i in 0..ADVERSARY_COUNT {
        let ctx = TargetContext {
            maze: &world.maze,
            player_pos: world.player.pos,
            player_dir: world.player.direction,
            leader_pos: world.adversaries[0].pos,
            elapsed: world.elapsed,
        };
        if ai::update_adversary(&mut world.adversaries[i], &ctx, dt, speed) == Outcome::Revived {
            debug!(id = i, "adversary back at spawn");
            events.push(GameEvent::AdversaryRevived { id: i });
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Collision / scoring
// ══════════════════════════════════════════════════════════════

/// Eat whatever is under the player. Returns true when a power pickup
/// refreshed the scared countdown this tick.
fn resolve_pickup(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    let pos = world.player.pos;
    let (x, y) = world.maze.wrapped_cell(pos);

    match world.maze.tile_at_wrapped(pos) {
        Tile::Pickup => {
            world.maze.set_tile_wrapped(pos, Tile::Empty);
            world.score += world.config.scoring.pickup;
            world.consumables_eaten += 1;
            events.push(GameEvent::PickupEaten { x, y });
            false
        }
        Tile::PowerPickup => {
            world.maze.set_tile_wrapped(pos, Tile::Empty);
            world.score += world.config.scoring.power_pickup;
            world.consumables_eaten += 1;
            world.scared_timer = world.config.timing.scared_secs;
            world.eaten_chain = 0;
            let flipped = ai::frighten_all(&mut world.adversaries);
            debug!(flipped, "power pickup");
            events.push(GameEvent::PowerPickupEaten { x, y });
            true
        }
        Tile::Empty | Tile::Wall | Tile::Gate => false,
    }
}

/// Returns true if the player was killed.
fn resolve_adversary_contact(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    let player_pos = world.player.pos;

    for i in 0..ADVERSARY_COUNT {
        if world.adversaries[i].pos.distance(player_pos) >= CONTACT_DISTANCE { continue; }

        match world.adversaries[i].mode {
            Mode::ChaseScatter => {
                events.push(GameEvent::PlayerKilled { by: i });
                player_die(world, i);
                return true;
            }
            Mode::Scared => {
                ai::mark_eaten(&mut world.adversaries[i]);
                world.eaten_chain += 1;
                let points = world
                    .config
                    .scoring
                    .adversary_base
                    .saturating_mul(1 << world.eaten_chain.min(MAX_COMBO_SHIFT));
                world.score = world.score.saturating_add(points);
                events.push(GameEvent::AdversaryEaten { id: i, points });
            }
            Mode::Eaten => {}
        }
    }
    false
}

// ══════════════════════════════════════════════════════════════
// Timers
// ══════════════════════════════════════════════════════════════

fn resolve_timers(world: &mut WorldState, dt: f32, refreshed: bool, events: &mut Vec<GameEvent>) {
    world.elapsed += dt as f64;

    if refreshed { return; }
    let any_scared = world.adversaries.iter().any(|a| a.mode == Mode::Scared);
    if world.scared_timer > 0.0 || any_scared {
        world.scared_timer = (world.scared_timer - dt).max(0.0);
        if world.scared_timer == 0.0 {
            ai::calm_all(&mut world.adversaries);
            world.eaten_chain = 0;
            events.push(GameEvent::ScaredExpired);
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Win / lose
// ══════════════════════════════════════════════════════════════

fn resolve_win(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.consumables_eaten >= world.consumables_total() {
        world.phase = Phase::Win;
        info!(score = world.score, "maze cleared");
        events.push(GameEvent::GameWon);
    }
}

fn player_die(world: &mut WorldState, by: usize) {
    world.phase = Phase::Dying;
    world.player.size = 1.0;
    world.player.direction = Direction::None;
    world.player.queued = None;
    debug!(by, lives = world.lives, "player caught");
}

fn resolve_dying(world: &mut WorldState, dt: f32, events: &mut Vec<GameEvent>) {
    let duration = world.config.timing.dying_secs;
    world.player.size = if duration > 0.0 {
        (world.player.size - dt / duration).max(0.0)
    } else {
        0.0
    };
    if world.player.size > 0.0 { return; }

    if world.lives > 0 {
        world.lives -= 1;
        world.respawn();
        world.phase = Phase::Playing;
        info!(lives_left = world.lives, "life lost");
        events.push(GameEvent::LifeLost { lives_left: world.lives });
    } else {
        world.phase = Phase::Lose;
        info!(score = world.score, "game over");
        events.push(GameEvent::GameLost);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
