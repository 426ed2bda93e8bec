/// The maze: fixed layout plus the mutable pickup layer.
///
/// ## Coordinates
///
/// Two lookup flavors, used by different systems:
///   - `tile_at(cell)`        -> bounds-checked, NOT wrapping. `None` past the
///                               edge; callers treat `None` as impassable.
///                               Pathfinding uses this, so paths never cross
///                               the toroidal seam.
///   - `tile_at_wrapped(pos)` -> folds the position into `[0,W) x [0,H)`
///                               first. Player movement uses this, so the
///                               side tunnels connect.
///
/// `set_tile_wrapped()` is the only mutator and only ever eats pickups.

use super::entity::{cell_center, Cell, Vec2};
use super::tile::Tile;

/// A const board description: rows plus the spawn and corner cells.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub rows: &'static [&'static str],
    pub player_spawn: Cell,
    pub adversary_spawns: [Cell; 4],
    pub scatter_corners: [Cell; 4],
}

/// The embedded board.
///
/// Legend: `X` wall, `.` pickup, `o` power pickup, `-` gate, ` ` empty.
pub const CLASSIC: Layout = Layout {
    rows: &[
        "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
        "X............XX............X",
        "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
        "XoXXXX.XXXXX.XX.XXXXX.XXXXoX",
        "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
        "X..........................X",
        "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
        "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
        "X......XX....XX....XX......X",
        "XXXXXX.XXXXX.XX.XXXXX.XXXXXX",
        "     X.XX          XX.X     ",
        "     X.XX XXX--XXX XX.X     ",
        "XXXXXX.XX X      X XX.XXXXXX",
        "      .XX X      X XX.      ",
        "XXXXXX.XX X      X XX.XXXXXX",
        "     X.XX XXXXXXXX XX.X     ",
        "     X.XX          XX.X     ",
        "XXXXXX.XX XXXXXXXX XX.XXXXXX",
        "X............XX............X",
        "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
        "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
        "Xo..XX................XX..oX",
        "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
        "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
        "X......XX....XX....XX......X",
        "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
        "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
        "X..........................X",
        "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    ],
    player_spawn: (13, 16),
    adversary_spawns: [(13, 10), (13, 13), (11, 13), (16, 13)],
    scatter_corners: [(26, 1), (1, 1), (26, 27), (1, 27)],
};

#[derive(Clone, Debug)]
pub struct MazeGrid {
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
    total_consumables: usize,
}

impl MazeGrid {
    /// Build a grid from layout rows. Width is the longest row; shorter
    /// rows are padded with `Empty`.
    pub fn parse(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut tiles = vec![vec![Tile::Empty; width]; height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                tiles[y][x] = Tile::from_char(ch);
            }
        }
        let total_consumables = tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| t.is_consumable())
            .count();
        MazeGrid { tiles, width, height, total_consumables }
    }

    pub fn from_layout(layout: &Layout) -> Self {
        Self::parse(layout.rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows of tiles, top to bottom. Read-only view for renderers.
    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Consumables present when the grid was built. Win threshold.
    pub fn total_consumables(&self) -> usize {
        self.total_consumables
    }

    pub fn remaining_consumables(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|t| t.is_consumable())
            .count()
    }

    /// Non-wrapping lookup. `None` = outside the grid.
    #[inline]
    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        let (x, y) = cell;
        if x < 0 || y < 0 {
            return None;
        }
        self.tiles.get(y as usize)?.get(x as usize).copied()
    }

    /// Fold a position into `[0,W) x [0,H)`.
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(pos.x, self.width as f32),
            wrap_axis(pos.y, self.height as f32),
        )
    }

    /// Grid cell of a position after wrapping.
    pub fn wrapped_cell(&self, pos: Vec2) -> (usize, usize) {
        let p = self.wrap(pos);
        let x = (p.x.floor() as usize).min(self.width.saturating_sub(1));
        let y = (p.y.floor() as usize).min(self.height.saturating_sub(1));
        (x, y)
    }

    pub fn tile_at_wrapped(&self, pos: Vec2) -> Tile {
        if self.width == 0 || self.height == 0 {
            return Tile::Wall;
        }
        let (x, y) = self.wrapped_cell(pos);
        self.tiles[y][x]
    }

    pub fn set_tile_wrapped(&mut self, pos: Vec2, tile: Tile) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (x, y) = self.wrapped_cell(pos);
        self.tiles[y][x] = tile;
    }

    /// Orthogonal neighbors an adversary may step to. Non-wrapping.
    pub fn pathable_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        let (x, y) = cell;
        DIRS.iter()
            .map(move |&(dx, dy)| (x + dx, y + dy))
            .filter(move |&n| self.is_pathable(n))
    }

    /// In bounds and not a wall.
    pub fn is_pathable(&self, cell: Cell) -> bool {
        self.tile_at(cell).is_some_and(Tile::is_pathable)
    }

    /// Continuous spawn point for a layout cell.
    pub fn spawn_point(cell: Cell) -> Vec2 {
        cell_center(cell)
    }
}

/// `v mod len` into `[0, len)`. `rem_euclid` can round up to `len` for tiny
/// negative inputs, so fold that back to 0.
fn wrap_axis(v: f32, len: f32) -> f32 {
    if len <= 0.0 || !v.is_finite() {
        return 0.0;
    }
    let r = v.rem_euclid(len);
    if r >= len { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> MazeGrid {
        MazeGrid::parse(&[
            "XXXXX",
            "X.o-X",
            "     ",
            "XXXXX",
        ])
    }

    #[test]
    fn classic_board_dimensions() {
        let m = MazeGrid::from_layout(&CLASSIC);
        assert_eq!(m.width(), 28);
        assert_eq!(m.height(), 29);
        assert_eq!(m.total_consumables(), 244);
        assert_eq!(m.remaining_consumables(), 244);
    }

    #[test]
    fn classic_spawns_and_corners_are_open() {
        let m = MazeGrid::from_layout(&CLASSIC);
        assert!(!m.tile_at(CLASSIC.player_spawn).unwrap().blocks_player());
        for cell in CLASSIC.adversary_spawns.iter().chain(CLASSIC.scatter_corners.iter()) {
            assert!(m.is_pathable(*cell), "{cell:?} should be pathable");
        }
    }

    #[test]
    fn tile_at_is_bounds_checked() {
        let m = small();
        assert_eq!(m.tile_at((1, 1)), Some(Tile::Pickup));
        assert_eq!(m.tile_at((3, 1)), Some(Tile::Gate));
        assert_eq!(m.tile_at((-1, 2)), None);
        assert_eq!(m.tile_at((5, 2)), None);
        assert_eq!(m.tile_at((0, 4)), None);
    }

    #[test]
    fn wrap_stays_in_bounds() {
        let m = small();
        for &(x, y) in &[
            (-0.0001, 0.0), (-5.5, -4.0), (5.0, 4.0), (123.25, -77.5),
            (-1e-8, -1e-8), (4.999, 3.999), (1e6, -1e6),
        ] {
            let p = m.wrap(Vec2::new(x, y));
            assert!(p.x >= 0.0 && p.x < 5.0, "x={} from {x}", p.x);
            assert!(p.y >= 0.0 && p.y < 4.0, "y={} from {y}", p.y);
        }
    }

    #[test]
    fn wrap_is_idempotent() {
        let m = small();
        for &(x, y) in &[(-0.3, 7.1), (2.5, 1.5), (-13.0, -0.01), (9.75, 4.0)] {
            let once = m.wrap(Vec2::new(x, y));
            assert_eq!(m.wrap(once), once);
        }
    }

    #[test]
    fn wrapped_lookup_crosses_the_seam() {
        let m = small();
        assert_eq!(m.tile_at_wrapped(Vec2::new(-0.5, 2.5)), Tile::Empty);
        assert_eq!(m.tile_at_wrapped(Vec2::new(6.5, 1.5)), Tile::Pickup);
        assert_eq!(m.tile_at_wrapped(Vec2::new(1.5, -1.5)), Tile::Empty);
        assert_eq!(m.tile_at_wrapped(Vec2::new(1.5, -2.5)), Tile::Pickup);
    }

    #[test]
    fn set_tile_wrapped_consumes() {
        let mut m = small();
        m.set_tile_wrapped(Vec2::new(7.2, 5.9), Tile::Empty);
        assert_eq!(m.tile_at((2, 1)), Some(Tile::Empty));
        assert_eq!(m.remaining_consumables(), 1);
        assert_eq!(m.total_consumables(), 2);
    }

    #[test]
    fn neighbors_skip_walls_and_seam() {
        let m = small();
        let mut n: Vec<Cell> = m.pathable_neighbors((0, 2)).collect();
        n.sort();
        // (-1,2) is off the grid, (0,1) and (0,3) are walls
        assert_eq!(n, vec![(1, 2)]);

        let mut n: Vec<Cell> = m.pathable_neighbors((3, 2)).collect();
        n.sort();
        assert_eq!(n, vec![(2, 2), (3, 1), (4, 2)]);
    }
}
