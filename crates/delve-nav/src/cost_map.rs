//! Translation of game state into cost grids.
//!
//! Three modes share one builder:
//!
//! - **generic**: terrain passability alone;
//! - **creature**: passability as seen by one mover, with lethal-terrain,
//!   avoidance, occupancy and exploration rules;
//! - **travel**: the simpler map behind travel-route distances.
//!
//! Every query is read-only. The grid passed in defines the area populated.

use delve_core::{
    CellFlags, ConfigError, CostConfig, CreatureView, ItemFlags, LevelQuery, MonsterFlags, Pos,
    TerrainFlags, TerrainMechFlags, TerrainQuery, PDS_FORBIDDEN, PDS_OBSTRUCTION,
};
use delve_grid::Grid;

/// Blocking sentinel for an impassable cell: [`PDS_OBSTRUCTION`] when it also
/// blocks diagonal movement, else [`PDS_FORBIDDEN`].
pub(crate) fn obstruction_cost<T: TerrainQuery + ?Sized>(terrain: &T, pos: Pos) -> i16 {
    if terrain.cell_has_terrain_flag(pos, TerrainFlags::OBSTRUCTS_DIAGONAL_MOVEMENT) {
        PDS_OBSTRUCTION
    } else {
        PDS_FORBIDDEN
    }
}

/// Whether the cell obstructs passability for creatures that know its
/// secrets.
///
/// A secret door still disguised as a wall is *not* obstructing here: its
/// discovered form lets creatures through.
pub(crate) fn obstructs_passability<T: TerrainQuery + ?Sized>(terrain: &T, pos: Pos) -> bool {
    terrain.cell_has_terrain_flag(pos, TerrainFlags::OBSTRUCTS_PASSABILITY)
        && (!terrain.cell_has_tm_flag(pos, TerrainMechFlags::IS_SECRET)
            || terrain
                .discovered_terrain_flags_at(pos)
                .contains(TerrainFlags::OBSTRUCTS_PASSABILITY))
}

/// Pathing blockers other than outright obstruction (lava, water, chasms,
/// traps).
pub(crate) fn soft_blocker() -> TerrainFlags {
    TerrainFlags::PATHING_BLOCKER - TerrainFlags::OBSTRUCTS_PASSABILITY
}

/// Generic cost of one cell.
///
/// - obstructing terrain: [`PDS_OBSTRUCTION`] or [`PDS_FORBIDDEN`] by its
///   diagonal flag;
/// - any other pathing blocker: [`PDS_FORBIDDEN`];
/// - otherwise 1.
pub fn generic_cell_cost<T: TerrainQuery + ?Sized>(terrain: &T, pos: Pos) -> i16 {
    if obstructs_passability(terrain, pos) {
        obstruction_cost(terrain, pos)
    } else if terrain.cell_has_terrain_flag(pos, soft_blocker()) {
        PDS_FORBIDDEN
    } else {
        1
    }
}

/// Builds cost grids from terrain, creatures and statuses.
#[derive(Clone, Debug, Default)]
pub struct CostMapBuilder {
    config: CostConfig,
}

impl CostMapBuilder {
    /// A builder with custom costs.
    ///
    /// Returns `Err` if `config` fails [`CostConfig::validate`].
    pub fn new(config: CostConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The costs in use.
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Fill `costs` with [`generic_cell_cost`] for every cell.
    pub fn populate_generic<T: TerrainQuery + ?Sized>(&self, terrain: &T, costs: &mut Grid) {
        for pos in costs.positions() {
            costs.set(pos, generic_cell_cost(terrain, pos));
        }
    }

    /// Fill `costs` with the cost of every cell for `mover`.
    ///
    /// `shore` is the level's distance-to-shore map (see
    /// [`SafetyMapEngine::update_map_to_shore`](crate::SafetyMapEngine::update_map_to_shore)).
    pub fn populate_for_creature<L: LevelQuery + ?Sized>(
        &self,
        level: &L,
        mover: &CreatureView,
        shore: &Grid,
        costs: &mut Grid,
    ) {
        for pos in costs.positions() {
            costs.set(pos, self.creature_cell_cost(level, mover, shore, pos));
        }
    }

    /// Cost of one cell for `mover`. Rules are tried in order and the first
    /// that applies decides.
    pub fn creature_cell_cost<L: LevelQuery + ?Sized>(
        &self,
        level: &L,
        mover: &CreatureView,
        shore: &Grid,
        pos: Pos,
    ) -> i16 {
        let is_player = mover.is_player();

        if is_player && !level.cell_has_flag(pos, CellFlags::DISCOVERED | CellFlags::MAGIC_MAPPED)
        {
            return PDS_OBSTRUCTION;
        }

        // The player never plans a route through a secret door they have
        // not found.
        let obstructs = if is_player {
            level.cell_has_terrain_flag(pos, TerrainFlags::OBSTRUCTS_PASSABILITY)
        } else {
            obstructs_passability(level, pos)
        };
        if obstructs {
            return obstruction_cost(level, pos);
        }

        if self.lethal_for(level, mover, shore, pos) {
            return PDS_FORBIDDEN;
        }

        if level.monster_avoids(mover, pos) {
            return PDS_FORBIDDEN;
        }

        if let Some(tenant) = level.monster_at(pos) {
            if tenant.id != mover.id && tenant.is_damage_immune() && !level.can_pass(mover, tenant)
            {
                return PDS_FORBIDDEN;
            }
        }

        let mut cost = if level.cell_has_flag(pos, CellFlags::KNOWN_TO_BE_TRAP_FREE)
            || mover.is_hostile()
        {
            self.config.trap_free_cost
        } else {
            self.config.unexplored_cost(level.depth_level())
        };

        if !mover.has_flags(MonsterFlags::INANIMATE)
            && level.cell_has_terrain_flag(pos, TerrainFlags::HARMFUL_TERRAIN)
        {
            cost += self.config.hazard_penalty;
        }

        if is_player
            && level
                .item_at(pos)
                .is_some_and(|item| item.flags.contains(ItemFlags::PLAYER_AVOIDS))
        {
            cost += self.config.avoided_item_penalty;
        }

        cost
    }

    /// Whether lethal terrain at `pos` would kill `mover` before it reached
    /// shore.
    ///
    /// Only movers relying on a temporary status are judged here: the status
    /// must last strictly longer than the time to get there and back out.
    /// Permanently protected movers skip the rule, and unprotected ones are
    /// left to their own avoidance.
    fn lethal_for<L: LevelQuery + ?Sized>(
        &self,
        level: &L,
        mover: &CreatureView,
        shore: &Grid,
        pos: Pos,
    ) -> bool {
        let needed = || {
            let travel = mover.loc.distance_to(pos) * i32::from(mover.movement_duration) / 100;
            i32::from(shore.get(pos)) + travel
        };

        let status = mover.status;
        if level.cell_has_terrain_flag(pos, TerrainFlags::LAVA_INSTA_DEATH)
            && !mover.info_flags.intersects(
                MonsterFlags::IMMUNE_TO_FIRE | MonsterFlags::FLIES | MonsterFlags::INVULNERABLE,
            )
            && (status.levitating > 0 || status.immune_to_fire > 0)
            && i32::from(status.longest_protection()) <= needed()
        {
            return true;
        }

        let drowns_or_falls = level.cell_has_terrain_flag(pos, TerrainFlags::AUTO_DESCENT)
            || (level.cell_has_terrain_flag(pos, TerrainFlags::IS_DEEP_WATER)
                && !mover.has_flags(MonsterFlags::IMMUNE_TO_WATER));
        drowns_or_falls
            && !mover.has_flags(MonsterFlags::FLIES)
            && status.levitating > 0
            && i32::from(status.levitating) <= needed()
    }

    /// Fill `costs` with the travel cost of every cell.
    ///
    /// - immobile, damage-immune creatures: [`PDS_FORBIDDEN`];
    /// - undiscovered secret doors, when `can_use_secret_doors`: 1;
    /// - obstructing terrain, and unknown cells when the traveler is the
    ///   player: [`PDS_OBSTRUCTION`] or [`PDS_FORBIDDEN`] by diagonal flag;
    /// - cells the traveler avoids or carrying any `blocking` flag:
    ///   [`PDS_FORBIDDEN`];
    /// - otherwise 1.
    pub fn populate_for_travel<L: LevelQuery + ?Sized>(
        &self,
        level: &L,
        traveler: Option<&CreatureView>,
        blocking: TerrainFlags,
        can_use_secret_doors: bool,
        costs: &mut Grid,
    ) {
        for pos in costs.positions() {
            costs.set(
                pos,
                travel_cell_cost(level, traveler, blocking, can_use_secret_doors, pos),
            );
        }
    }
}

fn travel_cell_cost<L: LevelQuery + ?Sized>(
    level: &L,
    traveler: Option<&CreatureView>,
    blocking: TerrainFlags,
    can_use_secret_doors: bool,
    pos: Pos,
) -> i16 {
    if level
        .monster_at(pos)
        .is_some_and(|m| m.is_damage_immune() && m.is_immobile())
    {
        return PDS_FORBIDDEN;
    }

    let obstructs = level.cell_has_terrain_flag(pos, TerrainFlags::OBSTRUCTS_PASSABILITY);
    if can_use_secret_doors
        && obstructs
        && level.cell_has_tm_flag(pos, TerrainMechFlags::IS_SECRET)
        && !level
            .discovered_terrain_flags_at(pos)
            .contains(TerrainFlags::OBSTRUCTS_PASSABILITY)
    {
        return 1;
    }

    let unknown_to_player = traveler.is_some_and(|t| t.is_player())
        && !level.cell_has_flag(pos, CellFlags::DISCOVERED | CellFlags::MAGIC_MAPPED);
    if obstructs || unknown_to_player {
        return obstruction_cost(level, pos);
    }

    if traveler.is_some_and(|t| level.monster_avoids(t, pos))
        || level.cell_has_terrain_flag(pos, blocking)
    {
        return PDS_FORBIDDEN;
    }

    1
}
