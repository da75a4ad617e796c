//! Field-of-view masks by recursive shadowcasting.
//!
//! Each of the eight octants around the origin is scanned row by row,
//! outward. Slopes are 16.16 fixed point, so the same inputs always light
//! the same cells. A cell is marked when any part of it falls between the
//! current start and end slopes and its centre lies strictly inside the
//! radius; an opaque cell is marked and then narrows the scan of the rows
//! behind it.

use delve_core::{CellFlags, Pos, TerrainFlags, TerrainQuery, FP_FACTOR};
use delve_grid::CellMask;

/// Octant transforms: `(xx, xy, yx, yy)` columns, one per octant.
const OCTANTS: [[i32; 8]; 4] = [
    [1, 0, 0, -1, -1, 0, 0, 1],
    [0, 1, -1, 0, 0, -1, 1, 0],
    [0, 1, 1, 0, 0, -1, -1, 0],
    [1, 0, 0, 1, -1, 0, 0, -1],
];

/// Parameters of one field-of-view cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FovQuery {
    /// Cell the view is cast from. Never itself marked.
    pub origin: Pos,
    /// Euclidean radius in 16.16 fixed point.
    pub radius_fp: i64,
    /// Terrain flags that block sight.
    pub obstruction: TerrainFlags,
    /// Cell knowledge flags that block sight.
    pub blocking_cells: CellFlags,
    /// When set nothing blocks sight and every cell in the radius is marked.
    pub omniscient: bool,
}

impl FovQuery {
    /// A cast blocked by `obstruction` terrain only.
    pub fn new(origin: Pos, radius_fp: i64, obstruction: TerrainFlags) -> Self {
        Self {
            origin,
            radius_fp,
            obstruction,
            blocking_cells: CellFlags::empty(),
            omniscient: false,
        }
    }

    /// Also block sight at cells carrying any of `flags`.
    pub fn blocking_cells(mut self, flags: CellFlags) -> Self {
        self.blocking_cells = flags;
        self
    }

    /// Ignore every obstruction.
    pub fn omniscient(mut self, omniscient: bool) -> Self {
        self.omniscient = omniscient;
        self
    }

    /// Whether the offset `(dx, dy)` lies strictly inside the radius.
    pub fn within(&self, dx: i32, dy: i32) -> bool {
        let d2 = i64::from(dx * dx + dy * dy);
        d2.saturating_mul(FP_FACTOR * FP_FACTOR) < self.radius_fp.saturating_mul(self.radius_fp)
    }

    /// The radius rounded up to whole cells.
    pub fn radius_cells(&self) -> i32 {
        let cells = (self.radius_fp.max(0) + FP_FACTOR - 1) / FP_FACTOR;
        i32::try_from(cells).unwrap_or(i32::MAX)
    }
}

/// Computes which cells can be seen from a point.
pub trait FovCaster {
    /// Set in `mask` every cell visible from `query.origin`.
    ///
    /// Cells already set in `mask` stay set, and the origin is left as it
    /// was. Obstructing cells are themselves visible. Cells outside the
    /// level count as opaque.
    fn fov_mask<T: TerrainQuery + ?Sized>(
        &self,
        terrain: &T,
        query: &FovQuery,
        mask: &mut CellMask,
    );
}

/// Eight-octant recursive shadowcasting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadowcastFov;

impl FovCaster for ShadowcastFov {
    fn fov_mask<T: TerrainQuery + ?Sized>(
        &self,
        terrain: &T,
        query: &FovQuery,
        mask: &mut CellMask,
    ) {
        let (w, h) = terrain.dims();
        let max_row = query.radius_cells().min(w.max(h) as i32);
        let mut caster = Caster {
            terrain,
            query,
            mask,
            max_row,
        };
        for oct in 0..8 {
            let t = Transform {
                xx: OCTANTS[0][oct],
                xy: OCTANTS[1][oct],
                yx: OCTANTS[2][oct],
                yy: OCTANTS[3][oct],
            };
            caster.scan(1, FP_FACTOR, 0, t);
        }
    }
}

#[derive(Clone, Copy)]
struct Transform {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

struct Caster<'a, T: ?Sized> {
    terrain: &'a T,
    query: &'a FovQuery,
    mask: &'a mut CellMask,
    max_row: i32,
}

/// `num / den` in 16.16 fixed point.
fn slope(num: i32, den: i32) -> i64 {
    i64::from(num) * FP_FACTOR / i64::from(den)
}

impl<T: TerrainQuery + ?Sized> Caster<'_, T> {
    fn opaque(&self, pos: Pos) -> bool {
        !self.query.omniscient
            && (self.terrain.cell_has_terrain_flag(pos, self.query.obstruction)
                || self.terrain.cell_has_flag(pos, self.query.blocking_cells))
    }

    fn scan(&mut self, row: i32, mut start: i64, end: i64, t: Transform) {
        if start < end {
            return;
        }
        let origin = self.query.origin;
        let mut next_start = start;

        for i in row..=self.max_row {
            let dy = -i;
            let mut blocked = false;

            for dx in -i..=0 {
                let left = slope(2 * dx - 1, 2 * dy + 1);
                let right = slope(2 * dx + 1, 2 * dy - 1);
                if start < right {
                    continue;
                }
                if end > left {
                    break;
                }

                let pos = Pos::new(
                    origin.x + dx * t.xx + dy * t.xy,
                    origin.y + dx * t.yx + dy * t.yy,
                );
                let inside = self.mask.contains(pos);
                if inside && self.query.within(dx, dy) {
                    self.mask.set(pos);
                }
                let opaque = !inside || self.opaque(pos);

                if blocked {
                    if opaque {
                        next_start = right;
                        continue;
                    }
                    blocked = false;
                    start = next_start;
                } else if opaque && i < self.max_row {
                    blocked = true;
                    self.scan(i + 1, start, left, t);
                    next_start = right;
                }
            }

            if blocked {
                break;
            }
        }
    }
}
