/// WorldState: the complete snapshot of a running game.
///
/// ## Ownership
///
/// One `WorldState` owns everything: the maze (with its pickup layer), the
/// player, and the fixed set of four adversaries. There is no other mutable
/// state; renderers read the public fields between ticks.
///
/// ## Two resets
///
///   - `reset_game()` rebuilds everything from the layout. Fresh maze,
///     zero score, full lives, zero timers.
///   - `respawn()` runs after a lost life. Player and adversaries go back
///     to spawn; maze and score are kept.

use crate::config::GameConfig;
use crate::domain::entity::{Adversary, Player};
use crate::domain::maze::{Layout, MazeGrid, CLASSIC};

pub const ADVERSARY_COUNT: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Start,
    Playing,
    Dying,
    Lose,
    Win,
}

#[derive(Clone, Debug)]
pub struct WorldState {
    pub layout: Layout,
    pub config: GameConfig,

    // ── Entities ──
    pub maze: MazeGrid,
    pub player: Player,
    pub adversaries: [Adversary; ADVERSARY_COUNT],

    // ── Meta ──
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub consumables_eaten: usize,
    /// Seconds of scared mode left. 0 = not scared.
    pub scared_timer: f32,
    /// Adversaries caught in the current power window.
    pub eaten_chain: u32,
    /// Simulated seconds spent Playing since the last `reset_game`.
    pub elapsed: f64,
    /// Playing ticks since the last `reset_game`.
    pub tick: u64,
}

// ── Construction ──

impl WorldState {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_layout(config, CLASSIC)
    }

    pub fn with_layout(config: &GameConfig, layout: Layout) -> Self {
        let player = Player::new(MazeGrid::spawn_point(layout.player_spawn));
        let adversaries = std::array::from_fn(|id| {
            Adversary::new(
                id,
                MazeGrid::spawn_point(layout.adversary_spawns[id]),
                layout.scatter_corners[id],
            )
        });
        WorldState {
            layout,
            config: config.clone(),
            maze: MazeGrid::from_layout(&layout),
            player,
            adversaries,
            phase: Phase::Start,
            score: 0,
            lives: config.lives,
            consumables_eaten: 0,
            scared_timer: 0.0,
            eaten_chain: 0,
            elapsed: 0.0,
            tick: 0,
        }
    }

    /// Full reconstruction from the layout. Phase returns to `Start`.
    pub fn reset_game(&mut self) {
        *self = WorldState::with_layout(&self.config, self.layout);
    }

    /// Partial reset after a lost life.
    pub fn respawn(&mut self) {
        self.player.reset();
        for adv in self.adversaries.iter_mut() {
            adv.reset();
        }
        self.scared_timer = 0.0;
        self.eaten_chain = 0;
    }
}

// ── Read-only queries ──

impl WorldState {
    pub fn consumables_total(&self) -> usize {
        self.maze.total_consumables()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Lose | Phase::Win)
    }
}
