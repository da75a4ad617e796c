//! Single-step descent of a distance map.

use delve_core::{CreatureView, Direction, LevelQuery, Pos, TerrainFlags, TerrainQuery};
use delve_grid::{Grid, Topology};

use crate::cost_map::obstructs_passability;

/// Whether a diagonal move from `from` to `to` clips a corner whose terrain
/// blocks diagonal movement.
///
/// Always `false` for orthogonal moves.
pub fn diagonal_blocked<T: TerrainQuery + ?Sized>(terrain: &T, from: Pos, to: Pos) -> bool {
    if from.x == to.x || from.y == to.y {
        return false;
    }
    let (w, h) = terrain.dims();
    [Pos::new(from.x, to.y), Pos::new(to.x, from.y)]
        .into_iter()
        .filter(|p| p.in_bounds(w, h))
        .any(|p| terrain.cell_has_terrain_flag(p, TerrainFlags::OBSTRUCTS_DIAGONAL_MOVEMENT))
}

/// The direction from `from` that descends `distances` most steeply, or
/// `None` when no enterable neighbour is lower.
///
/// A neighbour is skipped when the mover avoids it, when a creature stands
/// there that the mover can neither pass nor treat as friend or foe, when
/// the move clips a diagonal-blocking corner, or when its terrain
/// obstructs passability. Ties go to the first direction tried; with
/// `prefer_diagonals` the diagonals are tried first.
pub fn next_step<L: LevelQuery + ?Sized>(
    level: &L,
    distances: &Grid,
    from: Pos,
    mover: Option<&CreatureView>,
    topology: Topology,
    prefer_diagonals: bool,
) -> Option<Direction> {
    let here = i32::from(distances.get(from));
    let dirs = topology.directions();

    let mut best: Option<Direction> = None;
    let mut best_score = 0;

    let mut consider = |dir: Direction| {
        let to = from.step(dir);
        if !distances.contains(to) {
            return;
        }
        let score = here - i32::from(distances.get(to));
        if score <= best_score {
            return;
        }
        if let Some(monst) = mover {
            if level.monster_avoids(monst, to) {
                return;
            }
            if let Some(blocker) = level.monster_at(to) {
                if blocker.id != monst.id
                    && !level.can_pass(monst, blocker)
                    && !level.monsters_are_teammates(monst, blocker)
                    && !level.monsters_are_enemies(monst, blocker)
                {
                    return;
                }
            }
        }
        if diagonal_blocked(level, from, to) || obstructs_passability(level, to) {
            return;
        }
        best = Some(dir);
        best_score = score;
    };

    if prefer_diagonals {
        dirs.iter().rev().copied().for_each(&mut consider);
    } else {
        dirs.iter().copied().for_each(&mut consider);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::calculate_distances;
    use delve_core::{CreatureId, CreatureState};
    use delve_test_utils::MockDungeon;

    fn distances_to(d: &MockDungeon, dest: Pos) -> Grid {
        distances_with(d, dest, Topology::EightWay)
    }

    fn distances_with(d: &MockDungeon, dest: Pos, topology: Topology) -> Grid {
        let mut g = Grid::new();
        calculate_distances(
            d,
            &mut g,
            dest,
            TerrainFlags::PATHING_BLOCKER,
            None,
            false,
            topology,
        );
        g
    }

    #[test]
    fn steps_diagonally_toward_goal() {
        let d = MockDungeon::standard();
        let g = distances_to(&d, Pos::new(15, 15));
        let dir = next_step(&d, &g, Pos::new(10, 10), None, Topology::EightWay, false);
        assert_eq!(dir, Some(Direction::DownRight));
    }

    #[test]
    fn no_step_at_the_goal() {
        let d = MockDungeon::standard();
        let g = distances_to(&d, Pos::new(15, 15));
        assert_eq!(
            next_step(&d, &g, Pos::new(15, 15), None, Topology::EightWay, false),
            None
        );
    }

    #[test]
    fn cardinal_topology_never_steps_diagonally() {
        let d = MockDungeon::standard();
        let g = distances_with(&d, Pos::new(15, 15), Topology::Cardinal);
        let dir = next_step(&d, &g, Pos::new(10, 10), None, Topology::Cardinal, true);
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn diagonal_clip_against_wall_corner() {
        let d = MockDungeon::standard().with_wall(Pos::new(11, 10));
        assert!(diagonal_blocked(&d, Pos::new(10, 10), Pos::new(11, 11)));
        assert!(!diagonal_blocked(&d, Pos::new(10, 10), Pos::new(10, 11)));
        let pillar = MockDungeon::standard().with_pillar(Pos::new(11, 10));
        assert!(!diagonal_blocked(&pillar, Pos::new(10, 10), Pos::new(11, 11)));
    }

    #[test]
    fn neutral_blocker_is_stepped_around() {
        let captive = CreatureView::new(CreatureId(4), Pos::new(11, 10), CreatureState::Hostile)
            .with_captive(true);
        let d = MockDungeon::standard().with_creature(captive);
        let g = distances_to(&d, Pos::new(15, 12));
        let walker = CreatureView::new(CreatureId(5), Pos::new(10, 10), CreatureState::Ally);

        assert_eq!(
            next_step(&d, &g, Pos::new(10, 10), None, Topology::EightWay, false),
            Some(Direction::Right)
        );
        assert_eq!(
            next_step(&d, &g, Pos::new(10, 10), Some(&walker), Topology::EightWay, false),
            Some(Direction::UpRight)
        );
    }

    #[test]
    fn preferring_diagonals_breaks_ties_the_other_way() {
        // From (10,10) toward (20,10): Right, UpRight and DownRight all drop
        // by one.
        let d = MockDungeon::standard();
        let g = distances_to(&d, Pos::new(20, 10));
        let straight = next_step(&d, &g, Pos::new(10, 10), None, Topology::EightWay, false);
        let diagonal = next_step(&d, &g, Pos::new(10, 10), None, Topology::EightWay, true);
        assert_eq!(straight, Some(Direction::Right));
        assert_eq!(diagonal, Some(Direction::DownRight));
    }
}
