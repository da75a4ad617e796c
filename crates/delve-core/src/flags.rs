//! Flag sets describing terrain, cells, visibility, creatures, and items.
//!
//! Terrain flags are the union over every layer occupying a cell; the game
//! state answers membership queries through [`TerrainQuery`](crate::TerrainQuery).
//! Visibility flags are owned by the vision crate and never written by the
//! game state.

bitflags::bitflags! {
    /// Physical properties of the terrain layers in a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TerrainFlags: u32 {
        /// Creatures cannot enter the cell.
        const OBSTRUCTS_PASSABILITY = 1 << 0;
        /// The cell blocks line of sight.
        const OBSTRUCTS_VISION = 1 << 1;
        /// Items cannot rest in the cell.
        const OBSTRUCTS_ITEMS = 1 << 2;
        /// Gas cannot spread into the cell.
        const OBSTRUCTS_GAS = 1 << 3;
        /// A diagonal move that clips this cell's corner is blocked.
        const OBSTRUCTS_DIAGONAL_MOVEMENT = 1 << 4;
        /// Standing here poisons.
        const CAUSES_POISON = 1 << 5;
        /// The cell is burning.
        const IS_FIRE = 1 << 6;
        /// Standing here deals direct damage.
        const CAUSES_DAMAGE = 1 << 7;
        /// Standing here paralyses.
        const CAUSES_PARALYSIS = 1 << 8;
        /// Standing here confuses.
        const CAUSES_CONFUSION = 1 << 9;
        /// Standing here triggers an explosion.
        const CAUSES_EXPLOSIVE_DAMAGE = 1 << 10;
        /// Deep water: swimmers drop items and non-swimmers drift.
        const IS_DEEP_WATER = 1 << 11;
        /// Lava: instant death for anything not protected from fire.
        const LAVA_INSTA_DEATH = 1 << 12;
        /// Chasm or hole: anything without flight falls to the next level.
        const AUTO_DESCENT = 1 << 13;
        /// A trap that fires a dungeon feature when stepped on.
        const IS_DF_TRAP = 1 << 14;
        /// The cell may burst into flame at any moment.
        const SPONTANEOUSLY_IGNITES = 1 << 15;
        /// The cell entangles whatever enters it.
        const ENTANGLES = 1 << 16;
        /// Only the player and allies may enter.
        const SACRED = 1 << 17;

        /// Every property that makes a cell unsafe to walk through.
        const PATHING_BLOCKER = Self::OBSTRUCTS_PASSABILITY.bits()
            | Self::AUTO_DESCENT.bits()
            | Self::IS_DF_TRAP.bits()
            | Self::LAVA_INSTA_DEATH.bits()
            | Self::IS_DEEP_WATER.bits()
            | Self::SPONTANEOUSLY_IGNITES.bits();

        /// Properties that hurt a creature standing in the cell.
        const HARMFUL_TERRAIN = Self::CAUSES_POISON.bits()
            | Self::IS_FIRE.bits()
            | Self::CAUSES_DAMAGE.bits()
            | Self::CAUSES_PARALYSIS.bits()
            | Self::CAUSES_CONFUSION.bits()
            | Self::CAUSES_EXPLOSIVE_DAMAGE.bits();
    }
}

bitflags::bitflags! {
    /// Mechanical (behavioural) properties of terrain layers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TerrainMechFlags: u32 {
        /// The layer masquerades as something else until discovered.
        const IS_SECRET = 1 << 0;
        /// Seeing the layer for the first time stops automated exploration.
        const INTERRUPT_EXPLORATION_WHEN_SEEN = 1 << 1;
        /// Creatures stand inside the layer rather than on top of it.
        const STAND_IN_TILE = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Persistent per-cell knowledge and topology flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u32 {
        /// The player has seen the cell.
        const DISCOVERED = 1 << 0;
        /// The cell was revealed by magic mapping.
        const MAGIC_MAPPED = 1 << 1;
        /// An item lies in the cell.
        const HAS_ITEM = 1 << 2;
        /// The cell lies on a loop (more than one independent route).
        const IN_LOOP = 1 << 3;
        /// The player knows the cell holds no hidden trap.
        const KNOWN_TO_BE_TRAP_FREE = 1 << 4;
        /// The remembered appearance is current and need not be redrawn.
        const STABLE_MEMORY = 1 << 5;
    }
}

bitflags::bitflags! {
    /// Per-turn visibility state of a cell, with last-turn shadows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VisibilityFlags: u16 {
        /// In view and lit this turn.
        const VISIBLE = 1 << 0;
        /// [`VISIBLE`](Self::VISIBLE) last turn.
        const WAS_VISIBLE = 1 << 1;
        /// Revealed by clairvoyance this turn.
        const CLAIRVOYANT_VISIBLE = 1 << 2;
        /// [`CLAIRVOYANT_VISIBLE`](Self::CLAIRVOYANT_VISIBLE) last turn.
        const WAS_CLAIRVOYANT_VISIBLE = 1 << 3;
        /// Hidden by cursed clairvoyance this turn.
        const CLAIRVOYANT_DARKENED = 1 << 4;
        /// Revealed by telepathy this turn.
        const TELEPATHIC_VISIBLE = 1 << 5;
        /// [`TELEPATHIC_VISIBLE`](Self::TELEPATHIC_VISIBLE) last turn.
        const WAS_TELEPATHIC_VISIBLE = 1 << 6;
        /// Within unobstructed line of sight, regardless of light.
        const IN_FIELD_OF_VIEW = 1 << 7;

        /// Every flag recomputed from scratch each turn.
        const CURRENT = Self::VISIBLE.bits()
            | Self::CLAIRVOYANT_VISIBLE.bits()
            | Self::CLAIRVOYANT_DARKENED.bits()
            | Self::TELEPATHIC_VISIBLE.bits()
            | Self::IN_FIELD_OF_VIEW.bits();

        /// Every last-turn shadow flag.
        const PREVIOUS = Self::WAS_VISIBLE.bits()
            | Self::WAS_CLAIRVOYANT_VISIBLE.bits()
            | Self::WAS_TELEPATHIC_VISIBLE.bits();
    }
}

bitflags::bitflags! {
    /// Intrinsic abilities and immunities of a creature.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MonsterFlags: u32 {
        /// Ordinary weapons cannot hurt it.
        const IMMUNE_TO_WEAPONS = 1 << 0;
        /// Nothing can hurt it.
        const INVULNERABLE = 1 << 1;
        /// Never moves.
        const IMMOBILE = 1 << 2;
        /// Acts only when activated by a machine.
        const GETS_TURN_ON_ACTIVATION = 1 << 3;
        /// Fire and lava cannot hurt it.
        const IMMUNE_TO_FIRE = 1 << 4;
        /// Permanently airborne.
        const FLIES = 1 << 5;
        /// Swims through deep water unharmed.
        const IMMUNE_TO_WATER = 1 << 6;
        /// Not alive; ignores harmful terrain.
        const INANIMATE = 1 << 7;
        /// Can be struck from the far side of a wall.
        const ATTACKABLE_THRU_WALLS = 1 << 8;
    }
}

bitflags::bitflags! {
    /// Properties of an item lying in a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemFlags: u16 {
        /// A key that opens a vault or cage.
        const KEY = 1 << 0;
        /// The player has asked travel to route around this item.
        const PLAYER_AVOIDS = 1 << 1;
    }
}
