/// Events emitted during a simulation step.
/// The presentation layer consumes these for animation/sound.

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    PickupEaten { x: usize, y: usize },
    PowerPickupEaten { x: usize, y: usize },
    AdversaryEaten { id: usize, points: u32 },
    AdversaryRevived { id: usize },
    ScaredExpired,
    PlayerKilled { by: usize },
    LifeLost { lives_left: u32 },
    GameWon,
    GameLost,
}
