/// Entry point and headless demo loop.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use mazechase::config::GameConfig;
use mazechase::domain::entity::{Direction, FrameInput};
use mazechase::sim::autopilot;
use mazechase::sim::event::GameEvent;
use mazechase::sim::step;
use mazechase::sim::world::WorldState;

fn main() {
    tracing_subscriber::fmt::init();

    let config = GameConfig::load();
    let mut world = WorldState::new(&config);

    if let Err(e) = game_loop(&mut world, &config) {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Final Score: {}", world.score);
    println!("Lives left:  {}", world.lives);
    println!("Pickups:     {}/{} ({} left)", world.consumables_eaten, world.consumables_total(), world.maze.remaining_consumables());
    println!("Ticks:       {}", world.tick);
}

fn game_loop(world: &mut WorldState, config: &GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    let dt = config.tick_secs();
    if dt <= 0.0 {
        return Err(format!("tick_rate_ms must be positive, got {}", config.speed.tick_rate_ms).into());
    }
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);
    let limit = f64::from(config.demo_secs);

    let events = step::step(world, FrameInput { dt: 0.0, direction: Direction::None, start: true });
    process_events(&events);

    let mut simulated = 0.0_f64;
    while !world.is_over() && simulated < limit {
        let last_tick = Instant::now();

        let frame_input = FrameInput {
            dt,
            direction: autopilot::choose_direction(world),
            start: false,
        };
        let events = step::step(world, frame_input);
        process_events(&events);
        simulated += f64::from(dt);

        if config.realtime {
            if let Some(rest) = tick_rate.checked_sub(last_tick.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    if !world.is_over() {
        info!(seconds = limit, "demo time limit reached");
    }
    Ok(())
}

fn process_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PickupEaten { .. } | GameEvent::AdversaryRevived { .. } => {
                debug!(?event);
            }
            GameEvent::PowerPickupEaten { x, y } => info!(x, y, "power pickup"),
            GameEvent::AdversaryEaten { id, points } => info!(id, points, "adversary eaten"),
            GameEvent::ScaredExpired => debug!("scared mode over"),
            GameEvent::PlayerKilled { by } => info!(by, "player caught"),
            GameEvent::GameStarted
            | GameEvent::LifeLost { .. }
            | GameEvent::GameWon
            | GameEvent::GameLost => {}
        }
    }
}
