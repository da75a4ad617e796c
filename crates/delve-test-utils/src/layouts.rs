//! Seeded layouts for property tests and benchmarks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use delve_core::{CreatureId, CreatureQuery, CreatureState, CreatureView, Pos, DCOLS, DROWS};

use crate::MockDungeon;

/// A standard room scattered with walls, pillars and hazards.
///
/// `density` is the chance that an interior cell is not plain floor. The
/// same seed always yields the same level.
pub fn scattered(seed: u64, density: f64) -> MockDungeon {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut d = MockDungeon::standard().discover_all();
    for y in 1..DROWS as i32 - 1 {
        for x in 1..DCOLS as i32 - 1 {
            if !rng.gen_bool(density) {
                continue;
            }
            let p = Pos::new(x, y);
            d = match rng.gen_range(0..10) {
                0..=4 => d.with_wall(p),
                5 => d.with_pillar(p),
                6 => d.with_lava(p),
                7 => d.with_deep_water(p),
                8 => d.with_fire(p),
                _ => d.with_loop(p),
            };
        }
    }
    let player = open_cell(&mut rng, &d);
    d.with_player_at(player)
}

/// [`scattered`] plus `hostiles` hostile monsters on open cells.
pub fn populated(seed: u64, density: f64, hostiles: u32) -> MockDungeon {
    let mut d = scattered(seed, density);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
    for i in 0..hostiles {
        let at = open_cell(&mut rng, &d);
        d = d.with_creature(CreatureView::new(
            CreatureId(i + 1),
            at,
            CreatureState::Hostile,
        ));
    }
    d
}

/// A random interior cell with no terrain and nobody standing on it.
pub fn open_cell(rng: &mut impl Rng, d: &MockDungeon) -> Pos {
    loop {
        let p = Pos::new(
            rng.gen_range(1..DCOLS as i32 - 1),
            rng.gen_range(1..DROWS as i32 - 1),
        );
        if d.cell(p).terrain.is_empty() && d.monster_at(p).is_none() {
            return p;
        }
    }
}
