//! Multi-source shortest-path relaxation over dense grids.
//!
//! The scan repeatedly sweeps the whole grid, alternating raster direction,
//! and pushes `distance[cell] + cost[nb]` onto every legal neighbour until a
//! sweep changes nothing. There is no priority queue and no per-cell
//! allocation; convergence follows from distances being monotonically
//! non-increasing on a finite grid.
//!
//! # Movement rules
//!
//! - A step costs the cost-grid value of the *destination*.
//! - A destination with cost `<= 0` (either sentinel) is never entered.
//! - A diagonal step is illegal when either orthogonal corner cell is
//!   [`PDS_OBSTRUCTION`]. [`PDS_FORBIDDEN`](delve_core::PDS_FORBIDDEN)
//!   corners do not block.

use delve_core::{TerrainQuery, MAX_DISTANCE, PDS_FORBIDDEN, PDS_OBSTRUCTION};
use delve_grid::{Grid, Topology};
use tracing::trace;

use crate::cost_map::CostMapBuilder;

/// Diagnostics of a completed scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Full-grid sweeps performed, including the final sweep that changed
    /// nothing.
    pub sweeps: u32,
}

/// Relax `distance` in place against `cost`.
///
/// `distance` must be seeded: sources hold their starting value (usually 0)
/// and every other cell [`MAX_DISTANCE`]. With `cost = None` the scan uses
/// [`default_cost_grid`], under which nothing but the seeds is enterable.
///
/// # Panics
///
/// Debug builds assert the two grids have identical dimensions.
pub fn dijkstra_scan(distance: &mut Grid, cost: Option<&Grid>, topology: Topology) -> ScanStats {
    match cost {
        Some(cost) => scan(distance, cost, topology),
        None => {
            let cost = default_cost_grid(distance);
            scan(distance, &cost, topology)
        }
    }
}

/// Relax `distance` against the generic passability of live terrain.
///
/// Equivalent to building a generic cost map with [`CostMapBuilder`] and
/// passing it to [`dijkstra_scan`].
pub fn dijkstra_scan_with_terrain<T: TerrainQuery + ?Sized>(
    distance: &mut Grid,
    terrain: &T,
    topology: Topology,
) -> ScanStats {
    let mut cost = distance.clone();
    CostMapBuilder::default().populate_generic(terrain, &mut cost);
    scan(distance, &cost, topology)
}

/// The cost grid assumed when none is supplied: every interior cell
/// [`PDS_FORBIDDEN`], every border cell [`PDS_OBSTRUCTION`].
///
/// The result has the dimensions of `like`.
pub fn default_cost_grid(like: &Grid) -> Grid {
    let mut cost = like.clone();
    cost.fill(PDS_FORBIDDEN);
    for pos in like.positions() {
        if like.is_border(pos) {
            cost.set(pos, PDS_OBSTRUCTION);
        }
    }
    cost
}

fn scan(distance: &mut Grid, cost: &Grid, topology: Topology) -> ScanStats {
    debug_assert_eq!(distance.dims(), cost.dims(), "distance/cost dims differ");

    let (w, h) = distance.dims();
    let (wi, hi) = (w as i32, h as i32);
    let n = w * h;
    let offsets = topology.offsets();
    let costs = cost.cells();
    let dist = distance.cells_mut();

    let mut sweeps = 0u32;
    loop {
        sweeps += 1;
        let forward = sweeps % 2 == 1;
        let mut changed = false;

        for k in 0..n {
            let i = if forward { k } else { n - 1 - k };
            let d = dist[i];
            if d >= MAX_DISTANCE {
                continue;
            }
            let x = (i % w) as i32;
            let y = (i / w) as i32;

            for &(dx, dy) in offsets {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                    continue;
                }
                let j = ny as usize * w + nx as usize;
                let c = costs[j];
                if c <= 0 {
                    continue;
                }
                if dx != 0
                    && dy != 0
                    && (costs[y as usize * w + nx as usize] == PDS_OBSTRUCTION
                        || costs[ny as usize * w + x as usize] == PDS_OBSTRUCTION)
                {
                    continue;
                }
                let nd = i32::from(d) + i32::from(c);
                if nd < i32::from(dist[j]) {
                    dist[j] = nd as i16;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    trace!(sweeps, ?topology, cells = n, "dijkstra scan converged");
    ScanStats { sweeps }
}
