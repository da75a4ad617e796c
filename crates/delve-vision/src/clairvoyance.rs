//! Clairvoyant reveal and cursed darkening around the player.

use delve_core::{Pos, TerrainQuery, VisibilityFlags, VisionConfig, VisionEffects};

use crate::state::VisionState;

/// Radius of the clairvoyance disc at `level`, or `None` at level 0.
///
/// Positive levels reveal out to `level + bonus`; negative levels darken
/// out to `1 - level`.
pub fn clairvoyance_radius(level: i16, config: &VisionConfig) -> Option<i32> {
    match level {
        0 => None,
        l if l < 0 => Some(1 - i32::from(l)),
        l => Some(i32::from(l) + config.clairvoyance_bonus),
    }
}

/// Whether the offset `(dx, dy)` falls inside a clairvoyance disc of
/// radius `r`: `dx² + dy² < r² + r`.
pub fn in_clairvoyance_disc(dx: i32, dy: i32, r: i32) -> bool {
    dx * dx + dy * dy < r * r + r
}

impl VisionState {
    /// Apply clairvoyance `level` centred on `center`, the player's cell.
    ///
    /// Positive levels discover every non-permanent-wall cell of the disc,
    /// mark it [`CLAIRVOYANT_VISIBLE`](VisibilityFlags::CLAIRVOYANT_VISIBLE),
    /// and invalidate its remembered appearance (the player's own cell
    /// excepted). Negative levels mark the disc
    /// [`CLAIRVOYANT_DARKENED`](VisibilityFlags::CLAIRVOYANT_DARKENED).
    /// Returns the number of cells marked.
    pub fn apply_clairvoyance<H: TerrainQuery + VisionEffects + ?Sized>(
        &mut self,
        host: &mut H,
        center: Pos,
        level: i16,
        config: &VisionConfig,
    ) -> usize {
        let Some(r) = clairvoyance_radius(level, config) else {
            return 0;
        };
        let cursed = level < 0;
        let flag = if cursed {
            VisibilityFlags::CLAIRVOYANT_DARKENED
        } else {
            VisibilityFlags::CLAIRVOYANT_VISIBLE
        };

        let (w, h) = self.dims();
        let x_range = (center.x - r).max(0)..(center.x + r + 1).min(w as i32);
        let y_range = (center.y - r).max(0)..(center.y + r + 1).min(h as i32);

        let mut marked = 0;
        for y in y_range {
            for x in x_range.clone() {
                let pos = Pos::new(x, y);
                if !in_clairvoyance_disc(center.x - x, center.y - y, r)
                    || host.is_permanent_wall(pos)
                {
                    continue;
                }
                if !cursed {
                    host.discover_cell(pos);
                    if pos != center {
                        host.clear_stable_memory(pos);
                    }
                }
                self.insert(pos, flag);
                marked += 1;
            }
        }
        marked
    }
}
