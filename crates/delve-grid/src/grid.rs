//! The dense `i16` grid shared by cost maps, distance maps, and safety maps.

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use delve_core::{Pos, DCOLS, DROWS, MAX_DISTANCE, PDS_FORBIDDEN, PDS_OBSTRUCTION};

use crate::error::GridError;

/// A dense `width × height` array of signed 16-bit values, row-major.
///
/// The same type carries two families of meaning: a *cost grid* (positive
/// entry cost or a blocking sentinel) and a *distance grid* (cheapest
/// cost-to-reach, or [`MAX_DISTANCE`] when unreached).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<i16>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// A zero-filled grid of the standard dungeon size.
    pub fn new() -> Self {
        Self {
            width: DCOLS,
            height: DROWS,
            cells: vec![0; DCOLS * DROWS],
        }
    }

    /// A zero-filled grid of arbitrary size.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0.
    pub fn with_dims(width: usize, height: usize) -> Result<Self, GridError> {
        Self::filled(width, height, 0)
    }

    /// A grid of arbitrary size with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: i16) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![value; width * height],
        })
    }

    /// Wrap row-major data supplied by the caller.
    pub fn from_cells(width: usize, height: usize, cells: Vec<i16>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if cells.len() != width * height {
            return Err(GridError::DimensionMismatch {
                expected: (width, height),
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a text picture, one row per line: `#` is [`PDS_OBSTRUCTION`],
    /// `x` is [`PDS_FORBIDDEN`], `.` is 1, and a digit is that cost.
    ///
    /// Intended for tests and benchmarks.
    pub fn from_picture(picture: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * height);
        for row in &rows {
            if row.chars().count() != width {
                return Err(GridError::DimensionMismatch {
                    expected: (width, height),
                    got: row.chars().count() * height,
                });
            }
            cells.extend(row.chars().map(|ch| match ch {
                '#' => PDS_OBSTRUCTION,
                'x' => PDS_FORBIDDEN,
                other => other.to_digit(10).map_or(1, |d| d as i16),
            }));
        }
        Self::from_cells(width, height, cells)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flat index of `pos`.
    #[inline]
    pub fn index_of(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{pos} outside {}x{}", self.width, self.height);
        pos.y as usize * self.width + pos.x as usize
    }

    /// Position of flat index `i`.
    #[inline]
    pub fn pos_of(&self, i: usize) -> Pos {
        Pos::new((i % self.width) as i32, (i / self.width) as i32)
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    /// Whether `pos` lies on the outermost ring of cells.
    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x as usize == self.width - 1
            || pos.y as usize == self.height - 1
    }

    /// Value at `pos`.
    #[inline]
    pub fn get(&self, pos: Pos) -> i16 {
        self.cells[self.index_of(pos)]
    }

    /// Overwrite the value at `pos`.
    #[inline]
    pub fn set(&mut self, pos: Pos, value: i16) {
        let i = self.index_of(pos);
        self.cells[i] = value;
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: i16) {
        self.cells.fill(value);
    }

    /// Reset to an unseeded distance grid: every cell [`MAX_DISTANCE`].
    pub fn fill_unreached(&mut self) {
        self.fill(MAX_DISTANCE);
    }

    /// Copy every value of `other` into `self`.
    pub fn copy_from(&mut self, other: &Grid) -> Result<(), GridError> {
        if other.dims() != self.dims() {
            return Err(GridError::DimensionMismatch {
                expected: self.dims(),
                got: other.len(),
            });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[i16] {
        &self.cells
    }

    /// Mutable row-major cell values.
    pub fn cells_mut(&mut self) -> &mut [i16] {
        &mut self.cells
    }

    /// Every `(position, value)` pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, i16)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Pos::new((i % w) as i32, (i / w) as i32), v))
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Pos::new(x, y)))
    }

    /// Smallest value in the grid.
    pub fn min(&self) -> i16 {
        self.cells.iter().copied().min().unwrap_or(0)
    }

    /// Largest value in the grid.
    pub fn max(&self) -> i16 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Position of the smallest value, first in row-major order on ties.
    pub fn argmin(&self) -> Pos {
        let i = self
            .cells
            .iter()
            .enumerate()
            .min_by_key(|&(_, &v)| v)
            .map_or(0, |(i, _)| i);
        self.pos_of(i)
    }

    /// Text rendering for debugging: one line per row, `#` and `x` for the
    /// sentinels, `.` for [`MAX_DISTANCE`], else the value modulo 10.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            for &v in row {
                let ch = match v {
                    PDS_OBSTRUCTION => '#',
                    PDS_FORBIDDEN => 'x',
                    MAX_DISTANCE => '.',
                    v => char::from(b'0' + v.rem_euclid(10) as u8),
                };
                out.push(ch);
            }
            let _ = writeln!(out);
        }
        out
    }
}

impl Index<Pos> for Grid {
    type Output = i16;

    fn index(&self, pos: Pos) -> &i16 {
        &self.cells[self.index_of(pos)]
    }
}

impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, pos: Pos) -> &mut i16 {
        let i = self.index_of(pos);
        &mut self.cells[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_dungeon_sized_and_zeroed() {
        let g = Grid::new();
        assert_eq!(g.dims(), (79, 29));
        assert_eq!(g.len(), 79 * 29);
        assert!(g.cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn row_major_layout() {
        let mut g = Grid::with_dims(4, 3).unwrap();
        g.set(Pos::new(3, 1), 7);
        assert_eq!(g.cells()[7], 7);
        assert_eq!(g.pos_of(7), Pos::new(3, 1));
        assert_eq!(g[Pos::new(3, 1)], 7);
    }

    #[test]
    fn empty_dims_rejected() {
        assert_eq!(Grid::with_dims(0, 5), Err(GridError::EmptyGrid));
        assert_eq!(Grid::filled(5, 0, 1), Err(GridError::EmptyGrid));
    }

    #[test]
    fn from_cells_length_mismatch() {
        let err = Grid::from_cells(3, 3, vec![0; 8]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                expected: (3, 3),
                got: 8
            }
        );
        assert_eq!(err.to_string(), "expected 3x3 = 9 cells, got 8");
    }

    #[test]
    fn copy_requires_identical_dims() {
        let src = Grid::filled(4, 4, 9).unwrap();
        let mut dst = Grid::with_dims(4, 4).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut wrong = Grid::with_dims(5, 4).unwrap();
        assert!(wrong.copy_from(&src).is_err());
    }

    #[test]
    fn border_detection() {
        let g = Grid::new();
        assert!(g.is_border(Pos::new(0, 10)));
        assert!(g.is_border(Pos::new(78, 10)));
        assert!(g.is_border(Pos::new(10, 28)));
        assert!(!g.is_border(Pos::new(1, 1)));
    }

    #[test]
    fn picture_round_trip_through_dump() {
        let g = Grid::from_picture(
            "
            #####
            #.x.#
            #####
            ",
        )
        .unwrap();
        assert_eq!(g.dims(), (5, 3));
        assert_eq!(g[Pos::new(2, 1)], PDS_FORBIDDEN);
        assert_eq!(g[Pos::new(1, 1)], 1);
        assert_eq!(g.dump(), "#####\n#1x1#\n#####\n");
    }

    #[test]
    fn ragged_picture_rejected() {
        assert!(Grid::from_picture("###\n##\n").is_err());
    }

    #[test]
    fn min_max_argmin() {
        let mut g = Grid::filled(3, 3, 5).unwrap();
        g.set(Pos::new(2, 1), -4);
        g.set(Pos::new(0, 2), 12);
        assert_eq!(g.min(), -4);
        assert_eq!(g.max(), 12);
        assert_eq!(g.argmin(), Pos::new(2, 1));
    }

    #[test]
    fn iter_visits_row_major() {
        let g = Grid::with_dims(2, 2).unwrap();
        let order: Vec<Pos> = g.iter().map(|(p, _)| p).collect();
        assert_eq!(
            order,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
        assert_eq!(g.positions().collect::<Vec<_>>(), order);
    }
}
