//! Per-cell visibility flags carried from turn to turn.

use delve_core::{Pos, VisibilityFlags, DCOLS, DROWS};
use delve_grid::{CellMask, GridError};

/// Visibility flags of every cell on a level.
///
/// Lives as long as the level. Each update first shifts the current-turn
/// flags into their `WAS_*` shadows (see [`demote`](Self::demote)), so a
/// transition is always read off one cell's flags alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisionState {
    width: usize,
    height: usize,
    pub(crate) cells: Vec<VisibilityFlags>,
    /// Scratch mask for field-of-view casts, sized like the state.
    pub(crate) scratch: CellMask,
}

impl Default for VisionState {
    fn default() -> Self {
        Self::new()
    }
}

impl VisionState {
    /// All-clear state for the standard dungeon size.
    pub fn new() -> Self {
        Self {
            width: DCOLS,
            height: DROWS,
            cells: vec![VisibilityFlags::empty(); DCOLS * DROWS],
            scratch: CellMask::new(),
        }
    }

    /// All-clear state of arbitrary size.
    pub fn with_dims(width: usize, height: usize) -> Result<Self, GridError> {
        let scratch = CellMask::with_dims(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![VisibilityFlags::empty(); width * height],
            scratch,
        })
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub(crate) fn index_of(&self, pos: Pos) -> usize {
        debug_assert!(
            pos.in_bounds(self.width, self.height),
            "{pos} outside {}x{}",
            self.width,
            self.height
        );
        pos.y as usize * self.width + pos.x as usize
    }

    /// Flags of the cell at `pos`.
    pub fn flags(&self, pos: Pos) -> VisibilityFlags {
        self.cells[self.index_of(pos)]
    }

    /// Whether the cell carries every one of `flags`.
    pub fn contains(&self, pos: Pos, flags: VisibilityFlags) -> bool {
        self.flags(pos).contains(flags)
    }

    /// Add `flags` to the cell.
    pub fn insert(&mut self, pos: Pos, flags: VisibilityFlags) {
        let i = self.index_of(pos);
        self.cells[i] |= flags;
    }

    /// Remove `flags` from the cell.
    pub fn remove(&mut self, pos: Pos, flags: VisibilityFlags) {
        let i = self.index_of(pos);
        self.cells[i] -= flags;
    }

    /// Whether the player sees the cell this turn.
    pub fn is_visible(&self, pos: Pos) -> bool {
        self.contains(pos, VisibilityFlags::VISIBLE)
    }

    /// Whether the player sees the cell, or perceives it by clairvoyance
    /// or telepathy, this turn.
    pub fn can_see_or_sense(&self, pos: Pos) -> bool {
        self.flags(pos).intersects(
            VisibilityFlags::VISIBLE
                | VisibilityFlags::CLAIRVOYANT_VISIBLE
                | VisibilityFlags::TELEPATHIC_VISIBLE,
        )
    }

    /// Number of cells carrying every one of `flags`.
    pub fn count(&self, flags: VisibilityFlags) -> usize {
        self.cells.iter().filter(|c| c.contains(flags)).count()
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Pos::new(x, y)))
    }

    /// Start a new turn: each current flag becomes its `WAS_*` shadow and
    /// every current-turn flag is cleared.
    pub fn demote(&mut self) {
        const SHADOWS: [(VisibilityFlags, VisibilityFlags); 3] = [
            (VisibilityFlags::VISIBLE, VisibilityFlags::WAS_VISIBLE),
            (
                VisibilityFlags::CLAIRVOYANT_VISIBLE,
                VisibilityFlags::WAS_CLAIRVOYANT_VISIBLE,
            ),
            (
                VisibilityFlags::TELEPATHIC_VISIBLE,
                VisibilityFlags::WAS_TELEPATHIC_VISIBLE,
            ),
        ];
        for cell in &mut self.cells {
            let mut next = VisibilityFlags::empty();
            for (now, was) in SHADOWS {
                if cell.contains(now) {
                    next |= was;
                }
            }
            *cell = next;
        }
    }

    /// Add `flags` to every cell set in the scratch mask. Returns how many.
    pub(crate) fn mark_scratch(&mut self, flags: VisibilityFlags) -> usize {
        let mut n = 0;
        for pos in self.scratch.iter_set() {
            let i = pos.y as usize * self.width + pos.x as usize;
            self.cells[i] |= flags;
            n += 1;
        }
        n
    }
}
