//! Multi-turn visibility sequences against a mock level.

use delve_core::{CellFlags, CreatureQuery, Pos, TerrainQuery, VisibilityFlags, FP_FACTOR};
use delve_grid::CellMask;
use delve_test_utils::{layouts, MockDungeon, VisionEvent};
use delve_vision::{FovCaster, FovQuery, Observer, ShadowcastFov, VisibilityUpdater, VisionState};
use proptest::prelude::*;

fn corridor_level() -> MockDungeon {
    // Two rooms joined by a one-cell doorway at (40, 14).
    let mut d = MockDungeon::standard();
    for y in 1..28 {
        if y != 14 {
            d = d.with_wall(Pos::new(40, y));
        }
    }
    d
}

#[test]
fn walking_through_a_doorway_reveals_the_far_room() {
    let mut d = corridor_level();
    let mut s = VisionState::new();
    let updater = VisibilityUpdater::default();

    let first = updater.update(&mut s, &mut d, &Observer::at(Pos::new(20, 14)), true);
    assert!(!s.is_visible(Pos::new(60, 5)));
    assert!(!d.cell_has_flag(Pos::new(60, 5), CellFlags::DISCOVERED));

    let second = updater.update(&mut s, &mut d, &Observer::at(Pos::new(41, 14)).on_turn(1), true);
    assert!(s.is_visible(Pos::new(60, 5)));
    assert!(d.cell_has_flag(Pos::new(60, 5), CellFlags::DISCOVERED));
    assert!(second.newly_visible > 0);
    assert!(second.newly_hidden > 0);
    assert!(first.in_view > 0);

    // Cells of the first room, now behind the wall, are remembered.
    assert!(!s.is_visible(Pos::new(38, 2)));
    assert!(s.contains(Pos::new(38, 2), VisibilityFlags::WAS_VISIBLE));
    assert!(d.cell_has_flag(Pos::new(38, 2), CellFlags::STABLE_MEMORY));
}

#[test]
fn discovery_happens_once() {
    let mut d = MockDungeon::standard();
    let mut s = VisionState::new();
    let updater = VisibilityUpdater::default();
    let at = Pos::new(30, 14);

    updater.update(&mut s, &mut d, &Observer::at(at), true);
    let discovered_once = d.count_events(|e| *e == VisionEvent::Discovered(Pos::new(50, 20)));
    for turn in 1..4 {
        updater.update(&mut s, &mut d, &Observer::at(at).on_turn(turn), true);
    }
    let discovered_total = d.count_events(|e| *e == VisionEvent::Discovered(Pos::new(50, 20)));
    assert_eq!(discovered_once, 1);
    assert_eq!(discovered_total, 1);
}

#[test]
fn telepathic_reveal_fades_into_memory() {
    use delve_core::{CreatureId, CreatureState, CreatureView};

    let target = Pos::new(60, 14);
    let mut d = corridor_level().with_creature(
        CreatureView::new(CreatureId(7), target, CreatureState::Hostile).with_telepathy(true),
    );
    let mut s = VisionState::new();
    let updater = VisibilityUpdater::default();
    let o = Observer::at(Pos::new(10, 5));

    let r = updater.update(&mut s, &mut d, &o, true);
    assert_eq!(r.telepathic, 1);
    assert!(s.contains(target, VisibilityFlags::TELEPATHIC_VISIBLE));
    assert!(!s.is_visible(target));

    // The creature slips out of telepathic contact.
    let mut d = corridor_level().with_creature(CreatureView::new(
        CreatureId(7),
        target,
        CreatureState::Hostile,
    ));
    updater.update(&mut s, &mut d, &o.on_turn(1), true);
    assert!(s.contains(target, VisibilityFlags::WAS_TELEPATHIC_VISIBLE));
    assert!(d.events().contains(&VisionEvent::StoredMemory(target)));
    assert!(d.events().contains(&VisionEvent::Refreshed(target)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn field_of_view_is_deterministic(seed in any::<u64>()) {
        let d = layouts::scattered(seed, 0.3);
        let origin = d.player().loc;
        let query = FovQuery::new(origin, 30 * FP_FACTOR, delve_core::TerrainFlags::OBSTRUCTS_VISION);
        let mut a = CellMask::new();
        let mut b = CellMask::new();
        ShadowcastFov.fov_mask(&d, &query, &mut a);
        ShadowcastFov.fov_mask(&d, &query, &mut b);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn neighbours_of_the_origin_are_always_in_view(seed in any::<u64>()) {
        let d = layouts::scattered(seed, 0.4);
        let origin = d.player().loc;
        let (w, h) = d.dims();
        let query = FovQuery::new(origin, 10 * FP_FACTOR, delve_core::TerrainFlags::OBSTRUCTS_VISION);
        let mut mask = CellMask::new();
        ShadowcastFov.fov_mask(&d, &query, &mut mask);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let p = origin.offset(dx, dy);
                if (dx, dy) != (0, 0) && p.in_bounds(w, h) {
                    prop_assert!(mask.get(p), "{} not in view of {}", p, origin);
                }
            }
        }
        prop_assert!(!mask.get(origin));
    }

    #[test]
    fn visible_implies_in_view_and_lit(seed in any::<u64>(), turns in 1u64..4) {
        let mut d = layouts::populated(seed, 0.3, 3);
        let at = d.player().loc;
        let mut s = VisionState::new();
        let updater = VisibilityUpdater::default();
        for turn in 0..turns {
            updater.update(&mut s, &mut d, &Observer::at(at).on_turn(turn), true);
        }
        for p in s.positions() {
            if s.is_visible(p) {
                prop_assert!(s.contains(p, VisibilityFlags::IN_FIELD_OF_VIEW));
                prop_assert!(d.cell_has_flag(p, CellFlags::DISCOVERED));
            }
        }
    }
}
