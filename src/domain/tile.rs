/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Tile {
    #[default]
    Empty,
    Wall,        // Blocks everyone
    Pickup,      // Small consumable
    PowerPickup, // Consumable that scares the adversaries
    Gate,        // Pen door: blocks the player, adversaries pass
}

impl Tile {
    /// Layout legend. Unknown characters read as `Empty`.
    pub fn from_char(ch: char) -> Tile {
        match ch {
            'X' => Tile::Wall,
            '.' => Tile::Pickup,
            'o' => Tile::PowerPickup,
            '-' => Tile::Gate,
            _ => Tile::Empty,
        }
    }

    /// Is this tile still waiting to be eaten?
    pub fn is_consumable(self) -> bool {
        match self {
            Tile::Pickup | Tile::PowerPickup => true,
            Tile::Empty | Tile::Wall | Tile::Gate => false,
        }
    }

    /// Can the player NOT enter this tile?
    pub fn blocks_player(self) -> bool {
        match self {
            Tile::Wall | Tile::Gate => true,
            Tile::Empty | Tile::Pickup | Tile::PowerPickup => false,
        }
    }

    /// Can an adversary path through this tile?
    pub fn is_pathable(self) -> bool {
        match self {
            Tile::Wall => false,
            Tile::Empty | Tile::Pickup | Tile::PowerPickup | Tile::Gate => true,
        }
    }
}
