//! Level-scoped safety-family grids and their per-turn update flags.
//!
//! [`LevelMaps`] is created once per level and threaded through every call
//! that needs a safety-family grid. Each grid carries an explicit "updated
//! this turn" flag: a getter rebuilds its grid only when the flag is clear,
//! and [`begin_turn`](LevelMaps::begin_turn) clears every flag. Terrain
//! changes never invalidate a grid on their own.

use delve_core::{CostConfig, CreatureView, LevelQuery, SafetyConfig, TerrainQuery};
use delve_grid::Grid;
use tracing::debug;

use crate::cost_map::CostMapBuilder;
use crate::safety::{MapKind, SafetyMapEngine};

/// The safety, ally-safety, safe-terrain and shore grids of one level.
#[derive(Clone, Debug)]
pub struct LevelMaps {
    engine: SafetyMapEngine,
    costs: CostMapBuilder,
    turn: u64,
    safety_map: Grid,
    ally_safety_map: Grid,
    safe_terrain_map: Grid,
    map_to_shore: Grid,
    updated_safety_map_this_turn: bool,
    updated_ally_safety_map_this_turn: bool,
    updated_safe_terrain_map_this_turn: bool,
    updated_map_to_shore_this_turn: bool,
}

/// Builder for [`LevelMaps`].
///
/// Required: `dims`.
pub struct LevelMapsBuilder {
    dims: Option<(usize, usize)>,
    safety: SafetyConfig,
    cost: CostConfig,
}

impl LevelMaps {
    /// Create a new builder.
    pub fn builder() -> LevelMapsBuilder {
        LevelMapsBuilder {
            dims: None,
            safety: SafetyConfig::default(),
            cost: CostConfig::default(),
        }
    }

    /// Turns begun since the level was created.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Start a new turn: every grid becomes stale.
    pub fn begin_turn(&mut self) {
        self.turn += 1;
        self.updated_safety_map_this_turn = false;
        self.updated_ally_safety_map_this_turn = false;
        self.updated_safe_terrain_map_this_turn = false;
        self.updated_map_to_shore_this_turn = false;
    }

    /// Whether `kind` has been rebuilt since the turn began.
    pub fn is_current(&self, kind: MapKind) -> bool {
        match kind {
            MapKind::Safety => self.updated_safety_map_this_turn,
            MapKind::AllySafety => self.updated_ally_safety_map_this_turn,
            MapKind::SafeTerrain => self.updated_safe_terrain_map_this_turn,
            MapKind::Shore => self.updated_map_to_shore_this_turn,
        }
    }

    /// The map monsters use to flee the player.
    pub fn safety_map<L: LevelQuery + ?Sized>(&mut self, level: &L) -> &Grid {
        if !self.updated_safety_map_this_turn {
            self.engine.update_safety_map(level, &mut self.safety_map);
            self.updated_safety_map_this_turn = true;
            self.log_rebuild(MapKind::Safety);
        }
        &self.safety_map
    }

    /// The map the player's allies use to flee hostile monsters.
    pub fn ally_safety_map<L: LevelQuery + ?Sized>(&mut self, level: &L) -> &Grid {
        if !self.updated_ally_safety_map_this_turn {
            self.engine
                .update_ally_safety_map(level, &mut self.ally_safety_map);
            self.updated_ally_safety_map_this_turn = true;
            self.log_rebuild(MapKind::AllySafety);
        }
        &self.ally_safety_map
    }

    /// Distance to the nearest harmless cell.
    pub fn safe_terrain_map<L: LevelQuery + ?Sized>(&mut self, level: &L) -> &Grid {
        if !self.updated_safe_terrain_map_this_turn {
            self.engine
                .update_safe_terrain_map(level, &mut self.safe_terrain_map);
            self.updated_safe_terrain_map_this_turn = true;
            self.log_rebuild(MapKind::SafeTerrain);
        }
        &self.safe_terrain_map
    }

    /// Distance to the nearest cell that is neither impassable nor lethal.
    pub fn map_to_shore<T: TerrainQuery + ?Sized>(&mut self, terrain: &T) -> &Grid {
        if !self.updated_map_to_shore_this_turn {
            self.engine.update_map_to_shore(terrain, &mut self.map_to_shore);
            self.updated_map_to_shore_this_turn = true;
            self.log_rebuild(MapKind::Shore);
        }
        &self.map_to_shore
    }

    /// The safety map `creature` should flee along: the ally map for the
    /// player's allies, the primary map for everyone else.
    pub fn safety_map_for<L: LevelQuery + ?Sized>(
        &mut self,
        creature: &CreatureView,
        level: &L,
    ) -> &Grid {
        if creature.is_ally() {
            self.ally_safety_map(level)
        } else {
            self.safety_map(level)
        }
    }

    /// Fill `costs` with `mover`'s creature cost map, rebuilding the shore
    /// map first if it is stale.
    pub fn creature_cost_map<L: LevelQuery + ?Sized>(
        &mut self,
        level: &L,
        mover: &CreatureView,
        costs: &mut Grid,
    ) {
        self.map_to_shore(level);
        self.costs
            .populate_for_creature(level, mover, &self.map_to_shore, costs);
    }

    fn log_rebuild(&self, kind: MapKind) {
        debug!(kind = %kind, turn = self.turn, "rebuilt level map");
    }
}

impl LevelMapsBuilder {
    /// Set the level's `(width, height)`.
    pub fn dims(mut self, width: usize, height: usize) -> Self {
        self.dims = Some((width, height));
        self
    }

    /// Set the safety transform constants. Default: [`SafetyConfig::default`].
    pub fn safety_config(mut self, config: SafetyConfig) -> Self {
        self.safety = config;
        self
    }

    /// Set the creature cost constants. Default: [`CostConfig::default`].
    pub fn cost_config(mut self, config: CostConfig) -> Self {
        self.cost = config;
        self
    }

    /// Build the maps, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `dims` is not set or has a zero side
    /// - either config fails validation
    pub fn build(self) -> Result<LevelMaps, String> {
        let (width, height) = self.dims.ok_or_else(|| "dims is required".to_string())?;
        let blank = Grid::with_dims(width, height).map_err(|e| format!("dims: {e}"))?;
        let engine = SafetyMapEngine::new(self.safety).map_err(|e| format!("safety: {e}"))?;
        let costs = CostMapBuilder::new(self.cost).map_err(|e| format!("cost: {e}"))?;

        Ok(LevelMaps {
            engine,
            costs,
            turn: 0,
            safety_map: blank.clone(),
            ally_safety_map: blank.clone(),
            safe_terrain_map: blank.clone(),
            map_to_shore: blank,
            updated_safety_map_this_turn: false,
            updated_ally_safety_map_this_turn: false,
            updated_safe_terrain_map_this_turn: false,
            updated_map_to_shore_this_turn: false,
        })
    }
}
