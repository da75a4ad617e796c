//! End-to-end distance scans over hand-built cost grids and mock levels.

use delve_core::{Pos, TerrainFlags, MAX_DISTANCE, PDS_FORBIDDEN, PDS_OBSTRUCTION};
use delve_grid::{Grid, Topology};
use delve_nav::{calculate_distances, dijkstra_scan, dijkstra_scan_with_terrain};
use delve_test_utils::{layouts, MockDungeon};
use proptest::prelude::*;

/// A 79 × 29 cost grid: obstruction on the border, cost 1 inside.
fn bordered() -> Grid {
    let mut g = Grid::new();
    g.fill(1);
    for p in g.positions() {
        if g.is_border(p) {
            g.set(p, PDS_OBSTRUCTION);
        }
    }
    g
}

fn seeded(sources: &[Pos]) -> Grid {
    let mut d = Grid::new();
    d.fill(MAX_DISTANCE);
    for &s in sources {
        d.set(s, 0);
    }
    d
}

fn scan_from(sources: &[Pos], costs: &Grid, topology: Topology) -> Grid {
    let mut d = seeded(sources);
    dijkstra_scan(&mut d, Some(costs), topology);
    d
}

// ── Open room ───────────────────────────────────────────────────

#[test]
fn open_room_cardinal_is_manhattan() {
    let d = scan_from(&[Pos::new(10, 10)], &bordered(), Topology::Cardinal);
    assert_eq!(d[Pos::new(15, 15)], 10);
    assert_eq!(d[Pos::new(11, 11)], 2);
    assert_eq!(d[Pos::new(10, 10)], 0);
}

#[test]
fn open_room_eight_way_is_chebyshev() {
    let d = scan_from(&[Pos::new(10, 10)], &bordered(), Topology::EightWay);
    assert_eq!(d[Pos::new(15, 15)], 5);
    assert_eq!(d[Pos::new(11, 11)], 1);
    assert_eq!(d[Pos::new(77, 27)], 67);
}

#[test]
fn border_is_never_entered() {
    let d = scan_from(&[Pos::new(10, 10)], &bordered(), Topology::EightWay);
    for p in d.positions() {
        if d.is_border(p) {
            assert_eq!(d[p], MAX_DISTANCE, "border cell {p} was reached");
        }
    }
}

#[test]
fn forbidden_cell_stays_unreached() {
    let mut costs = bordered();
    costs.set(Pos::new(12, 12), PDS_FORBIDDEN);
    let d = scan_from(&[Pos::new(10, 10)], &costs, Topology::EightWay);
    assert_eq!(d[Pos::new(12, 12)], MAX_DISTANCE);
    // The only three-step route ran through it.
    assert_eq!(d[Pos::new(13, 13)], 4);
}

#[test]
fn seeds_keep_their_value() {
    let mut d = seeded(&[Pos::new(10, 10)]);
    d.set(Pos::new(30, 10), -20);
    dijkstra_scan(&mut d, Some(&bordered()), Topology::EightWay);
    assert_eq!(d[Pos::new(30, 10)], -20);
    assert_eq!(d[Pos::new(31, 10)], -19);
    // Nearer to the low seed than to the zero seed.
    assert_eq!(d[Pos::new(20, 10)], -10);
}

// ── Walls ───────────────────────────────────────────────────────

#[test]
fn full_height_wall_cuts_the_map() {
    for wall in [PDS_OBSTRUCTION, PDS_FORBIDDEN] {
        let mut costs = bordered();
        for y in 1..28 {
            costs.set(Pos::new(40, y), wall);
        }
        let d = scan_from(&[Pos::new(10, 10)], &costs, Topology::EightWay);
        assert_eq!(d[Pos::new(39, 10)], 29);
        assert_eq!(d[Pos::new(41, 10)], MAX_DISTANCE);
        assert_eq!(d[Pos::new(77, 27)], MAX_DISTANCE);
    }
}

#[test]
fn forbidden_corners_allow_diagonals_through_a_gap() {
    // A wall at x = 40 with a gap at y = 10. From (39, 9) the shortest way
    // to (41, 9) cuts both corners of the gap.
    let route = |wall: i16| {
        let mut costs = bordered();
        for y in 1..28 {
            if y != 10 {
                costs.set(Pos::new(40, y), wall);
            }
        }
        scan_from(&[Pos::new(39, 9)], &costs, Topology::EightWay)[Pos::new(41, 9)]
    };
    assert_eq!(route(PDS_FORBIDDEN), 2);
    assert_eq!(route(PDS_OBSTRUCTION), 4);
}

// ── Costs ───────────────────────────────────────────────────────

#[test]
fn two_sources_meet_in_the_middle() {
    let d = scan_from(
        &[Pos::new(10, 10), Pos::new(20, 10)],
        &bordered(),
        Topology::EightWay,
    );
    assert_eq!(d[Pos::new(15, 10)], 5);
    assert_eq!(d[Pos::new(15, 14)], 5);
    assert_eq!(d[Pos::new(14, 10)], 4);
    assert_eq!(d[Pos::new(16, 10)], 4);
}

#[test]
fn uniform_band_adds_its_surcharge() {
    // Three full-height columns of cost 3 lie across every route.
    let mut costs = bordered();
    for y in 1..28 {
        for x in 10..=12 {
            costs.set(Pos::new(x, y), 3);
        }
    }
    for topology in [Topology::Cardinal, Topology::EightWay] {
        let d = scan_from(&[Pos::new(5, 5)], &costs, topology);
        assert_eq!(d[Pos::new(20, 5)], 15 + 3 * (3 - 1), "{topology:?}");
    }
}

#[test]
fn corridor_distance_is_its_length() {
    let mut costs = Grid::new();
    costs.fill(PDS_OBSTRUCTION);
    for x in 5..=20 {
        costs.set(Pos::new(x, 5), 1);
    }
    let d = scan_from(&[Pos::new(5, 5)], &costs, Topology::EightWay);
    assert_eq!(d[Pos::new(20, 5)], 15);
    assert_eq!(d[Pos::new(12, 6)], MAX_DISTANCE);
}

#[test]
fn picture_scan_routes_around_walls() {
    let costs = Grid::from_picture(
        "
        #######
        #.....#
        #.###.#
        #.#...#
        #######
        ",
    )
    .unwrap();
    let mut d = costs.clone();
    d.fill(MAX_DISTANCE);
    d.set(Pos::new(1, 3), 0);
    dijkstra_scan(&mut d, Some(&costs), Topology::EightWay);
    // Up the left side, along the top, and back down: no corner cutting
    // past the obstruction walls.
    assert_eq!(d[Pos::new(3, 3)], 10);
    assert_eq!(d[Pos::new(5, 1)], 6);
}

// ── Terrain-driven scans ────────────────────────────────────────

#[test]
fn terrain_scan_avoids_lava() {
    let mut level = MockDungeon::standard();
    for y in 1..28 {
        level = level.with_lava(Pos::new(30, y));
    }
    let mut d = seeded(&[Pos::new(10, 10)]);
    dijkstra_scan_with_terrain(&mut d, &level, Topology::EightWay);
    assert_eq!(d[Pos::new(29, 10)], 19);
    assert_eq!(d[Pos::new(31, 10)], MAX_DISTANCE);
}

#[test]
fn travel_distances_respect_blocking_flags() {
    let level = MockDungeon::standard().with_fire(Pos::new(11, 10));
    let mut strict = Grid::new();
    let mut lax = Grid::new();
    calculate_distances(
        &level,
        &mut strict,
        Pos::new(10, 10),
        TerrainFlags::PATHING_BLOCKER | TerrainFlags::IS_FIRE,
        None,
        false,
        Topology::Cardinal,
    );
    calculate_distances(
        &level,
        &mut lax,
        Pos::new(10, 10),
        TerrainFlags::PATHING_BLOCKER,
        None,
        false,
        Topology::Cardinal,
    );
    assert_eq!(lax[Pos::new(12, 10)], 2);
    assert_eq!(strict[Pos::new(12, 10)], 4);
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn converged_scan_is_a_fixed_point(seed in any::<u64>(), sx in 1i32..78, sy in 1i32..28) {
        let level = layouts::scattered(seed, 0.3);
        let mut d = seeded(&[Pos::new(sx, sy)]);
        dijkstra_scan_with_terrain(&mut d, &level, Topology::EightWay);
        let before = d.clone();
        let stats = dijkstra_scan_with_terrain(&mut d, &level, Topology::EightWay);
        prop_assert_eq!(stats.sweeps, 1);
        prop_assert_eq!(d, before);
    }

    #[test]
    fn scans_are_deterministic(seed in any::<u64>()) {
        let level = layouts::scattered(seed, 0.2);
        let source = level.player_view().loc;
        let mut a = seeded(&[source]);
        let mut b = seeded(&[source]);
        dijkstra_scan_with_terrain(&mut a, &level, Topology::Cardinal);
        dijkstra_scan_with_terrain(&mut b, &level, Topology::Cardinal);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn eight_way_never_exceeds_cardinal(seed in any::<u64>()) {
        let level = layouts::scattered(seed, 0.25);
        let source = level.player_view().loc;
        let mut four = seeded(&[source]);
        let mut eight = seeded(&[source]);
        dijkstra_scan_with_terrain(&mut four, &level, Topology::Cardinal);
        dijkstra_scan_with_terrain(&mut eight, &level, Topology::EightWay);
        for p in four.positions() {
            prop_assert!(eight[p] <= four[p], "{} : {} > {}", p, eight[p], four[p]);
        }
    }
}
