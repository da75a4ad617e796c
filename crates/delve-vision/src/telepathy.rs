//! Telepathic sight of revealed creatures and their surroundings.

use delve_core::{
    CreatureQuery, TerrainFlags, TerrainQuery, VisibilityFlags, VisionEffects, FP_FACTOR,
};

use crate::fov::{FovCaster, FovQuery};
use crate::state::VisionState;

impl VisionState {
    /// Mark every telepathically revealed creature's cell, and a small field
    /// of view of `radius` cells around it,
    /// [`TELEPATHIC_VISIBLE`](VisibilityFlags::TELEPATHIC_VISIBLE), and
    /// discover those cells. Returns the number of creatures revealed.
    pub fn apply_telepathy<H, F>(&mut self, host: &mut H, fov: &F, radius: i32) -> usize
    where
        H: TerrainQuery + CreatureQuery + VisionEffects + ?Sized,
        F: FovCaster,
    {
        let revealed: Vec<_> = host
            .creatures()
            .filter(|c| c.telepathically_revealed)
            .map(|c| c.loc)
            .collect();

        for &loc in &revealed {
            self.scratch.clear();
            let query = FovQuery::new(
                loc,
                i64::from(radius) * FP_FACTOR,
                TerrainFlags::OBSTRUCTS_VISION,
            );
            fov.fov_mask(&*host, &query, &mut self.scratch);
            self.scratch.set(loc);
            self.mark_scratch(VisibilityFlags::TELEPATHIC_VISIBLE);
            for pos in self.scratch.iter_set() {
                host.discover_cell(pos);
            }
        }
        revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fov::ShadowcastFov;
    use delve_core::{CellFlags, CreatureId, CreatureState, CreatureView, Pos};
    use delve_test_utils::MockDungeon;

    #[test]
    fn revealed_creatures_light_up_their_surroundings() {
        let seen = Pos::new(40, 14);
        let unseen = Pos::new(60, 14);
        let mut d = MockDungeon::standard()
            .with_creature(
                CreatureView::new(CreatureId(1), seen, CreatureState::Hostile).with_telepathy(true),
            )
            .with_creature(CreatureView::new(CreatureId(2), unseen, CreatureState::Hostile));
        let mut s = VisionState::new();

        assert_eq!(s.apply_telepathy(&mut d, &ShadowcastFov, 2), 1);
        assert!(s.contains(seen, VisibilityFlags::TELEPATHIC_VISIBLE));
        assert!(s.contains(Pos::new(41, 14), VisibilityFlags::TELEPATHIC_VISIBLE));
        assert!(!s.contains(Pos::new(42, 14), VisibilityFlags::TELEPATHIC_VISIBLE));
        assert!(!s.contains(unseen, VisibilityFlags::TELEPATHIC_VISIBLE));
        assert!(d.cell_has_flag(seen, CellFlags::DISCOVERED));
        assert!(!d.cell_has_flag(unseen, CellFlags::DISCOVERED));
    }

    #[test]
    fn walls_limit_the_telepathic_view() {
        let at = Pos::new(40, 14);
        let mut d = MockDungeon::standard()
            .with_wall(Pos::new(41, 14))
            .with_creature(
                CreatureView::new(CreatureId(1), at, CreatureState::Hostile).with_telepathy(true),
            );
        let mut s = VisionState::new();
        s.apply_telepathy(&mut d, &ShadowcastFov, 3);
        assert!(s.contains(Pos::new(41, 14), VisibilityFlags::TELEPATHIC_VISIBLE));
        assert!(!s.contains(Pos::new(42, 14), VisibilityFlags::TELEPATHIC_VISIBLE));
        assert!(s.contains(Pos::new(39, 14), VisibilityFlags::TELEPATHIC_VISIBLE));
    }
}
