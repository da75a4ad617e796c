//! Adjacency used by distance scans.

use delve_core::{Direction, Pos};
use smallvec::SmallVec;

/// 4-connected offsets, in [`Direction::CARDINAL`] order.
const OFFSETS_4: [(i32, i32); 4] = [
    Direction::Up.offset(),
    Direction::Down.offset(),
    Direction::Left.offset(),
    Direction::Right.offset(),
];

/// 8-connected offsets, in [`Direction::ALL`] order: cardinals, then
/// diagonals.
const OFFSETS_8: [(i32, i32); 8] = [
    Direction::Up.offset(),
    Direction::Down.offset(),
    Direction::Left.offset(),
    Direction::Right.offset(),
    Direction::UpLeft.offset(),
    Direction::DownLeft.offset(),
    Direction::UpRight.offset(),
    Direction::DownRight.offset(),
];

/// Neighbourhood of a cell during a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Up, down, left, right. Distances on open ground are Manhattan.
    Cardinal,
    /// Cardinals plus diagonals. Distances on open ground are Chebyshev.
    #[default]
    EightWay,
}

impl Topology {
    /// `(dx, dy)` offsets of the neighbourhood, cardinals first.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Topology::Cardinal => &OFFSETS_4,
            Topology::EightWay => &OFFSETS_8,
        }
    }

    /// Directions of the neighbourhood, cardinals first.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Topology::Cardinal => &Direction::CARDINAL,
            Topology::EightWay => &Direction::ALL,
        }
    }

    /// Whether diagonal moves are part of the neighbourhood.
    pub fn allows_diagonals(self) -> bool {
        matches!(self, Topology::EightWay)
    }

    /// In-bounds neighbours of `pos` on a `width × height` grid.
    pub fn neighbours(self, pos: Pos, width: usize, height: usize) -> SmallVec<[Pos; 8]> {
        self.offsets()
            .iter()
            .map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|p| p.in_bounds(width, height))
            .collect()
    }

    /// Graph distance between two cells on open, unbounded ground.
    pub fn open_distance(self, a: Pos, b: Pos) -> i32 {
        match self {
            Topology::Cardinal => a.manhattan_to(b),
            Topology::EightWay => a.distance_to(b),
        }
    }
}
