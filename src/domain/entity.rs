/// Entities: Player, Adversary, plus the small value types they move with.
/// Positions are continuous: the integer part picks the cell, 0.5 is the
/// cell center. `+y` points down the rows.

pub use glam::Vec2;

/// Integer grid cell `(x, y)`. May be negative or past the edge; the maze
/// decides what that means.
pub type Cell = (i32, i32);

/// Center of a cell in continuous coordinates.
pub fn cell_center(cell: Cell) -> Vec2 {
    Vec2::new(cell.0 as f32 + 0.5, cell.1 as f32 + 0.5)
}

/// The cell a point lies in.
pub fn cell_of(pos: Vec2) -> Cell {
    let c = pos.floor();
    (c.x as i32, c.y as i32)
}

/// Movement direction. Never diagonal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    #[default]
    None,
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Reduce raw axis input to a 4-way direction.
    /// A nonzero horizontal component suppresses the vertical one.
    pub fn from_axes(dx: f32, dy: f32) -> Direction {
        if dx > 0.0 {
            Direction::Right
        } else if dx < 0.0 {
            Direction::Left
        } else if dy > 0.0 {
            Direction::Down
        } else if dy < 0.0 {
            Direction::Up
        } else {
            Direction::None
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }

    pub fn vector(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }

    pub fn dot(self, other: Direction) -> i32 {
        let (ax, ay) = self.delta();
        let (bx, by) = other.delta();
        ax * bx + ay * by
    }

    pub fn is_none(self) -> bool {
        self == Direction::None
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Per-tick input from the outside world.
/// `direction` is held input; `start` is edge-triggered.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub dt: f32,
    pub direction: Direction,
    pub start: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub direction: Direction,
    pub queued: Option<Direction>,
    /// 1.0 normally; shrinks to 0.0 while dying.
    pub size: f32,
    pub spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Player {
            pos: spawn,
            direction: Direction::None,
            queued: None,
            size: 1.0,
            spawn,
        }
    }

    pub fn reset(&mut self) {
        *self = Player::new(self.spawn);
    }
}

/// Adversary mode. Transitions are driven from outside (pickups, contact,
/// the scared countdown) except `Eaten -> ChaseScatter` on reaching spawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    ChaseScatter,
    Scared,
    Eaten,
}

/// Chase behavior, fixed by adversary id.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Personality {
    Pursuer,  // id 0: straight at the player
    Ambusher, // id 1: ahead of the player, mirrored through adversary 0
    Flanker,  // id 2: a couple of cells ahead of the player
    Shy,      // id 3: retreats when close
}

impl Personality {
    pub fn from_id(id: usize) -> Personality {
        match id % 4 {
            0 => Personality::Pursuer,
            1 => Personality::Ambusher,
            2 => Personality::Flanker,
            _ => Personality::Shy,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Adversary {
    pub id: usize,
    pub spawn: Vec2,
    pub pos: Vec2,
    /// Next cell center to walk to. `None` = replan this tick.
    pub waypoint: Option<Vec2>,
    pub mode: Mode,
    pub scatter_corner: Cell,
}

impl Adversary {
    pub fn new(id: usize, spawn: Vec2, scatter_corner: Cell) -> Self {
        Adversary {
            id,
            spawn,
            pos: spawn,
            waypoint: None,
            mode: Mode::ChaseScatter,
            scatter_corner,
        }
    }

    pub fn personality(&self) -> Personality {
        Personality::from_id(self.id)
    }

    pub fn cell(&self) -> Cell {
        cell_of(self.pos)
    }

    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.waypoint = None;
        self.mode = Mode::ChaseScatter;
    }
}
