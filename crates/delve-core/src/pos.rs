//! Dungeon dimensions, cell positions, and the eight movement directions.

use std::fmt;

/// Number of dungeon columns.
pub const DCOLS: usize = 79;

/// Number of dungeon rows.
pub const DROWS: usize = 29;

/// Number of fractional bits in the 16.16 fixed-point radii used by
/// field-of-view queries.
pub const FP_BASE: u32 = 16;

/// Fixed-point scale factor (`1 << FP_BASE`).
pub const FP_FACTOR: i64 = 1 << FP_BASE;

/// A cell position on the dungeon grid.
///
/// `x` indexes columns and `y` indexes rows. Positions produced by offset
/// arithmetic may lie outside the map; callers check [`Pos::in_bounds`]
/// before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Pos {
    /// Construct a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step away in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The position displaced by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether the position lies in a `width × height` grid.
    pub fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }

    /// Whether the position lies on the standard dungeon map.
    pub fn in_map(self) -> bool {
        self.in_bounds(DCOLS, DROWS)
    }

    /// King-move (Chebyshev) distance: the number of 8-way steps between
    /// two cells on open ground.
    pub fn distance_to(self, other: Pos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Manhattan distance: the number of cardinal steps between two cells.
    pub fn manhattan_to(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the eight king-move directions.
///
/// Declaration order is significant: the four cardinals come first, so
/// `Direction::ALL[..4]` is the 4-connected neighbourhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(0, -1)`.
    Up,
    /// `(0, 1)`.
    Down,
    /// `(-1, 0)`.
    Left,
    /// `(1, 0)`.
    Right,
    /// `(-1, -1)`.
    UpLeft,
    /// `(-1, 1)`.
    DownLeft,
    /// `(1, -1)`.
    UpRight,
    /// `(1, 1)`.
    DownRight,
}

impl Direction {
    /// All eight directions, cardinals first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::DownRight,
    ];

    /// The four cardinal directions.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dy)` displacement of one step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::UpRight => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Whether this is one of the four diagonal directions.
    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.offset();
        dx != 0 && dy != 0
    }

    /// The direction pointing the opposite way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
        }
    }
}
