//! Benchmark levels for the Delve crates.
//!
//! - [`reference_level`]: a standard 79x29 level with light clutter
//! - [`crowded_level`]: dense clutter and a dozen hostiles
//! - [`route_endpoints`]: deterministic open start/goal pairs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use delve_core::{CreatureQuery, Pos, TerrainQuery};
use delve_test_utils::{layouts, MockDungeon};

/// A fully discovered standard level: 20% clutter, four hostiles.
pub fn reference_level(seed: u64) -> MockDungeon {
    layouts::populated(seed, 0.2, 4)
}

/// A fully discovered standard level: 45% clutter, twelve hostiles.
pub fn crowded_level(seed: u64) -> MockDungeon {
    layouts::populated(seed, 0.45, 12)
}

/// `n` start/goal pairs on cells with no terrain and no creature.
///
/// Probes linearly from a seeded index, so the same `seed` always yields
/// the same pairs.
pub fn route_endpoints(level: &MockDungeon, n: usize, seed: u64) -> Vec<(Pos, Pos)> {
    let (w, h) = level.dims();
    let open: Vec<Pos> = (0..h as i32)
        .flat_map(|y| (0..w as i32).map(move |x| Pos::new(x, y)))
        .filter(|&p| level.terrain_flags(p).is_empty() && level.monster_at(p).is_none())
        .collect();
    if open.is_empty() {
        return Vec::new();
    }

    (0..n as u64)
        .map(|i| {
            let a = seed.wrapping_mul(6364136223846793005).wrapping_add(i) as usize % open.len();
            let b = seed
                .wrapping_mul(1442695040888963407)
                .wrapping_add(i.wrapping_mul(2862933555777941757)) as usize
                % open.len();
            (open[a], open[b])
        })
        .collect()
}
