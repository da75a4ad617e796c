//! Boolean per-cell masks, such as field-of-view results.

use delve_core::{Pos, DCOLS, DROWS};

use crate::error::GridError;

/// A dense `width × height` boolean grid, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Default for CellMask {
    fn default() -> Self {
        Self::new()
    }
}

impl CellMask {
    /// An all-clear mask of the standard dungeon size.
    pub fn new() -> Self {
        Self {
            width: DCOLS,
            height: DROWS,
            cells: vec![false; DCOLS * DROWS],
        }
    }

    /// An all-clear mask of arbitrary size.
    pub fn with_dims(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Whether `pos` lies inside the mask.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    #[inline]
    fn index_of(&self, pos: Pos) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// Whether `pos` is set.
    pub fn get(&self, pos: Pos) -> bool {
        self.cells[self.index_of(pos)]
    }

    /// Set `pos`.
    pub fn set(&mut self, pos: Pos) {
        let i = self.index_of(pos);
        self.cells[i] = true;
    }

    /// Clear `pos`.
    pub fn unset(&mut self, pos: Pos) {
        let i = self.index_of(pos);
        self.cells[i] = false;
    }

    /// Clear every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// Positions of the set cells, row-major.
    pub fn iter_set(&self) -> impl Iterator<Item = Pos> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| Pos::new((i % w) as i32, (i / w) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_count() {
        let mut m = CellMask::with_dims(4, 4).unwrap();
        assert_eq!(m.count(), 0);
        m.set(Pos::new(1, 2));
        m.set(Pos::new(3, 0));
        assert!(m.get(Pos::new(1, 2)));
        assert!(!m.get(Pos::new(2, 1)));
        assert_eq!(m.count(), 2);
        assert_eq!(
            m.iter_set().collect::<Vec<_>>(),
            vec![Pos::new(3, 0), Pos::new(1, 2)]
        );
        m.unset(Pos::new(3, 0));
        assert_eq!(m.count(), 1);
        m.clear();
        assert_eq!(m.count(), 0);
    }

    #[test]
    fn dungeon_sized_default() {
        assert_eq!(CellMask::default().dims(), (DCOLS, DROWS));
    }
}
