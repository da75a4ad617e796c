use delve_core::{Pos, MAX_DISTANCE};
use delve_grid::{CellMask, Grid, GridError, Topology};
use proptest::prelude::*;

#[test]
fn fill_unreached_then_seed() {
    let mut g = Grid::new();
    g.fill_unreached();
    g.set(Pos::new(10, 10), 0);
    assert_eq!(g.min(), 0);
    assert_eq!(g.max(), MAX_DISTANCE);
    assert_eq!(g.argmin(), Pos::new(10, 10));
}

#[test]
fn mask_and_grid_share_indexing() {
    let mut g = Grid::with_dims(6, 3).unwrap();
    let mut m = CellMask::with_dims(6, 3).unwrap();
    for p in [Pos::new(0, 0), Pos::new(5, 2), Pos::new(3, 1)] {
        g.set(p, 1);
        m.set(p);
    }
    let from_grid: Vec<Pos> = g.iter().filter(|&(_, v)| v == 1).map(|(p, _)| p).collect();
    let from_mask: Vec<Pos> = m.iter_set().collect();
    assert_eq!(from_grid, from_mask);
}

#[test]
fn copy_between_mismatched_grids_reports_dims() {
    let src = Grid::with_dims(3, 2).unwrap();
    let mut dst = Grid::with_dims(2, 3).unwrap();
    assert_eq!(
        dst.copy_from(&src),
        Err(GridError::DimensionMismatch {
            expected: (2, 3),
            got: 6
        })
    );
}

#[test]
fn border_neighbours_stay_in_bounds() {
    let g = Grid::new();
    for p in g.positions().filter(|&p| g.is_border(p)) {
        for n in Topology::EightWay.neighbours(p, g.width(), g.height()) {
            assert!(g.contains(n), "{n} escaped the grid from {p}");
        }
    }
}

proptest! {
    #[test]
    fn index_and_pos_are_inverse(w in 1usize..40, h in 1usize..40, seed in 0usize..1600) {
        let g = Grid::with_dims(w, h).unwrap();
        let i = seed % g.len();
        prop_assert_eq!(g.index_of(g.pos_of(i)), i);
    }

    #[test]
    fn fill_sets_every_cell(v in any::<i16>()) {
        let mut g = Grid::new();
        g.fill(v);
        prop_assert_eq!(g.min(), v);
        prop_assert_eq!(g.max(), v);
    }
}
