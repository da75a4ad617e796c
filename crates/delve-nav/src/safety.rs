//! Safety-family maps: danger-ranked grids consumed by monster AI.
//!
//! A safety map chains two scans. The *reachability* scan measures how far
//! each cell is from the threat; a saturating transform turns that distance
//! into a negative score (lower is safer); the *repulsion* scan then lets
//! those scores spread through terrain the fleeing side can enter, so a
//! cell next to a very safe cell is nearly as safe. Cells the fleeing side
//! cannot enter report [`MAX_DISTANCE`].
//!
//! ```text
//! v  = reach distance (MAX_DISTANCE -> unreached_clamp)
//! v' = -(inversion_factor * (knee * v / (knee + v))) - loop_bonus?
//! ```

use std::fmt;

use delve_core::{
    CellFlags, ConfigError, LevelQuery, MonsterFlags, Pos, SafetyConfig, TerrainFlags,
    TerrainMechFlags, TerrainQuery, MAX_DISTANCE, PDS_FORBIDDEN,
};
use delve_grid::{Grid, Topology};

use crate::cost_map::{obstruction_cost, obstructs_passability, soft_blocker};
use crate::dijkstra::dijkstra_scan;

/// Which level-scoped map a rebuild produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Safety from the player, for fleeing monsters.
    Safety,
    /// Safety from hostile monsters, for the player's allies.
    AllySafety,
    /// Distance to the nearest harmless cell.
    SafeTerrain,
    /// Distance to the nearest cell that is neither impassable nor lethal.
    Shore,
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapKind::Safety => "safety",
            MapKind::AllySafety => "ally_safety",
            MapKind::SafeTerrain => "safe_terrain",
            MapKind::Shore => "shore",
        };
        f.write_str(name)
    }
}

/// Rebuilds safety-family grids in place.
///
/// Stateless apart from its [`SafetyConfig`]; per-turn staleness is tracked
/// by the owner (see [`LevelMaps`](crate::LevelMaps)).
#[derive(Clone, Debug, Default)]
pub struct SafetyMapEngine {
    config: SafetyConfig,
}

impl SafetyMapEngine {
    /// An engine with custom transform constants.
    ///
    /// Returns `Err` if `config` fails [`SafetyConfig::validate`].
    pub fn new(config: SafetyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The transform constants in use.
    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Rebuild the map monsters use to flee the player.
    ///
    /// The reachability scan spreads from the player over every passable
    /// cell, sacred and enemy-occupied cells included. The repulsion scan
    /// runs over the monsters' map, where sacred cells and cells holding
    /// the player's enemies are forbidden.
    pub fn update_safety_map<L: LevelQuery + ?Sized>(&self, level: &L, safety: &mut Grid) {
        let player = level.player();
        let mut reach_costs = safety.clone();
        let mut flee_costs = safety.clone();

        for pos in safety.positions() {
            let (reach, flee) = if let Some(shared) = shared_terrain_cost(level, pos) {
                (shared, shared)
            } else if level.cell_has_terrain_flag(pos, TerrainFlags::SACRED) {
                (1, PDS_FORBIDDEN)
            } else if level
                .monster_at(pos)
                .is_some_and(|m| m.id != player.id && level.monsters_are_enemies(player, m))
            {
                (1, PDS_FORBIDDEN)
            } else {
                (1, 1)
            };
            reach_costs.set(pos, reach);
            flee_costs.set(pos, flee);
        }

        safety.fill(MAX_DISTANCE);
        safety.set(player.loc, 0);
        self.finish(level, safety, &reach_costs, &flee_costs);
    }

    /// Rebuild the map the player's allies use to flee hostile monsters.
    ///
    /// Seeds are every hostile, non-captive enemy of the player. The
    /// reachability scan spreads through terrain the hostiles can enter
    /// (sacred cells forbidden); the repulsion scan uses the allies' own
    /// movement map, where sacred cells are open and hostile-occupied cells
    /// forbidden.
    pub fn update_ally_safety_map<L: LevelQuery + ?Sized>(&self, level: &L, safety: &mut Grid) {
        let player = level.player();
        let mut reach_costs = safety.clone();
        let mut flee_costs = safety.clone();

        for pos in safety.positions() {
            let (reach, flee) = if let Some(shared) = shared_terrain_cost(level, pos) {
                (shared, shared)
            } else if level.cell_has_terrain_flag(pos, TerrainFlags::SACRED) {
                (PDS_FORBIDDEN, 1)
            } else {
                (1, 1)
            };
            reach_costs.set(pos, reach);
            flee_costs.set(pos, flee);
        }

        safety.fill(MAX_DISTANCE);
        for monst in level.creatures() {
            if level.monsters_are_enemies(player, monst) && !monst.captive {
                safety.set(monst.loc, 0);
                flee_costs.set(monst.loc, PDS_FORBIDDEN);
            }
        }
        self.finish(level, safety, &reach_costs, &flee_costs);
    }

    /// Reachability scan, transform, repulsion scan, finalisation.
    fn finish<T: TerrainQuery + ?Sized>(
        &self,
        terrain: &T,
        safety: &mut Grid,
        reach_costs: &Grid,
        flee_costs: &Grid,
    ) {
        dijkstra_scan(safety, Some(reach_costs), Topology::EightWay);

        for pos in safety.positions() {
            if flee_costs.get(pos) < 0 {
                continue;
            }
            let in_loop = terrain.cell_has_flag(pos, CellFlags::IN_LOOP);
            safety.set(pos, self.config.transform(safety.get(pos), in_loop));
        }

        dijkstra_scan(safety, Some(flee_costs), Topology::Cardinal);

        for pos in safety.positions() {
            if flee_costs.get(pos) < 0 {
                safety.set(pos, MAX_DISTANCE);
            }
        }
    }

    /// Rebuild the distance from each cell to the nearest harmless one,
    /// 4-directional.
    ///
    /// - impassable terrain and immobile damage-immune creatures: blocked
    ///   (diagonal-aware), left at [`MAX_DISTANCE`];
    /// - creatures stationary for more than a turn or attackable through
    ///   walls, and pathing blockers other than harmful terrain:
    ///   [`PDS_FORBIDDEN`], left at [`MAX_DISTANCE`];
    /// - harmful but passable terrain: cost 1, not a seed;
    /// - every other cell: a seed at 0.
    pub fn update_safe_terrain_map<L: LevelQuery + ?Sized>(&self, level: &L, safe: &mut Grid) {
        let mut costs = safe.clone();

        for pos in safe.positions() {
            let monst = level.monster_at(pos);
            let (cost, value) = if obstructs_passability(level, pos)
                || monst.is_some_and(|m| m.is_damage_immune() && m.is_immobile())
            {
                (obstruction_cost(level, pos), MAX_DISTANCE)
            } else if monst.is_some_and(|m| {
                m.turns_spent_stationary > 1 || m.has_flags(MonsterFlags::ATTACKABLE_THRU_WALLS)
            }) || (level.cell_has_terrain_flag(
                pos,
                TerrainFlags::PATHING_BLOCKER - TerrainFlags::HARMFUL_TERRAIN,
            ) && !level.cell_has_tm_flag(pos, TerrainMechFlags::IS_SECRET))
            {
                (PDS_FORBIDDEN, MAX_DISTANCE)
            } else if level.cell_has_terrain_flag(pos, TerrainFlags::HARMFUL_TERRAIN) {
                (1, MAX_DISTANCE)
            } else {
                (1, 0)
            };
            costs.set(pos, cost);
            safe.set(pos, value);
        }

        dijkstra_scan(safe, Some(&costs), Topology::Cardinal);
    }

    /// Rebuild the distance from each cell to the nearest cell that is
    /// neither impassable nor lethal, 8-directional.
    ///
    /// Lethal means lava, deep water or a chasm; secrets never count as
    /// either. Impassable cells stay at [`MAX_DISTANCE`].
    pub fn update_map_to_shore<T: TerrainQuery + ?Sized>(&self, terrain: &T, shore: &mut Grid) {
        let mut costs = shore.clone();
        let lethal =
            TerrainFlags::LAVA_INSTA_DEATH | TerrainFlags::IS_DEEP_WATER | TerrainFlags::AUTO_DESCENT;

        for pos in shore.positions() {
            let secret = terrain.cell_has_tm_flag(pos, TerrainMechFlags::IS_SECRET);
            let (cost, value) =
                if terrain.cell_has_terrain_flag(pos, TerrainFlags::OBSTRUCTS_PASSABILITY) && !secret
                {
                    (obstruction_cost(terrain, pos), MAX_DISTANCE)
                } else if terrain.cell_has_terrain_flag(pos, lethal) && !secret {
                    (1, MAX_DISTANCE)
                } else {
                    (1, 0)
                };
            costs.set(pos, cost);
            shore.set(pos, value);
        }

        dijkstra_scan(shore, Some(&costs), Topology::EightWay);
    }
}

/// Cost shared by both maps of a safety pipeline, or `None` when the cell
/// is open terrain and the maps may differ.
fn shared_terrain_cost<T: TerrainQuery + ?Sized>(terrain: &T, pos: Pos) -> Option<i16> {
    if obstructs_passability(terrain, pos) {
        Some(obstruction_cost(terrain, pos))
    } else if terrain.cell_has_terrain_flag(pos, soft_blocker()) {
        Some(PDS_FORBIDDEN)
    } else {
        None
    }
}
