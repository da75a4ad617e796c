//! Collaborator traits through which the engine reads and affects game state.
//!
//! The engine owns none of the dungeon. Every terrain, creature, and lighting
//! fact is pulled through these read-only query traits, and every side
//! effect of a visibility update is pushed through [`VisionEffects`].

use crate::creature::{CreatureView, ItemView};
use crate::flags::{CellFlags, TerrainFlags, TerrainMechFlags};
use crate::pos::{Pos, DCOLS, DROWS};

/// Read-only view of the terrain layers and per-cell knowledge.
///
/// Positions passed in are always inside [`dims`](TerrainQuery::dims).
pub trait TerrainQuery {
    /// `(width, height)` of the level. Defaults to the standard dungeon size.
    fn dims(&self) -> (usize, usize) {
        (DCOLS, DROWS)
    }

    /// Union of the terrain flags of every layer in the cell, as they
    /// currently behave (undiscovered secrets included).
    fn terrain_flags(&self, pos: Pos) -> TerrainFlags;

    /// Union of the mechanical flags of every layer in the cell.
    fn tm_flags(&self, pos: Pos) -> TerrainMechFlags;

    /// Terrain flags the cell would have once every secret in it were
    /// discovered.
    fn discovered_terrain_flags_at(&self, pos: Pos) -> TerrainFlags;

    /// Persistent knowledge flags of the cell.
    fn cell_flags(&self, pos: Pos) -> CellFlags;

    /// Whether the cell is an indestructible level-boundary wall.
    fn is_permanent_wall(&self, pos: Pos) -> bool;

    /// Depth of the current level, 1-based.
    fn depth_level(&self) -> i16;

    /// The item lying in the cell, if any.
    fn item_at(&self, pos: Pos) -> Option<&ItemView>;

    /// Whether any layer in the cell has any of `flags`.
    fn cell_has_terrain_flag(&self, pos: Pos, flags: TerrainFlags) -> bool {
        self.terrain_flags(pos).intersects(flags)
    }

    /// Whether any layer in the cell has any of `flags`.
    fn cell_has_tm_flag(&self, pos: Pos, flags: TerrainMechFlags) -> bool {
        self.tm_flags(pos).intersects(flags)
    }

    /// Whether the cell carries any of the knowledge `flags`.
    fn cell_has_flag(&self, pos: Pos, flags: CellFlags) -> bool {
        self.cell_flags(pos).intersects(flags)
    }
}

/// Read-only view of the creatures on the level.
pub trait CreatureQuery {
    /// The player.
    fn player(&self) -> &CreatureView;

    /// The creature standing in the cell, the player included.
    fn monster_at(&self, pos: Pos) -> Option<&CreatureView>;

    /// Every monster on the level, excluding the player, in a stable order.
    fn creatures(&self) -> Box<dyn Iterator<Item = &CreatureView> + '_>;

    /// Whether `monst`'s AI refuses to step into `pos`.
    fn monster_avoids(&self, monst: &CreatureView, pos: Pos) -> bool;

    /// Whether the two creatures are hostile to one another.
    fn monsters_are_enemies(&self, a: &CreatureView, b: &CreatureView) -> bool;

    /// Whether the two creatures fight on the same side.
    fn monsters_are_teammates(&self, a: &CreatureView, b: &CreatureView) -> bool;

    /// Whether `mover` may swap places with or push past `blocker`.
    fn can_pass(&self, mover: &CreatureView, blocker: &CreatureView) -> bool;
}

/// Terrain and creature queries together, as consumed by navigation.
pub trait LevelQuery: TerrainQuery + CreatureQuery {}

impl<T: TerrainQuery + CreatureQuery + ?Sized> LevelQuery for T {}

/// Light falling on a cell, in signed colour components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Light {
    /// Red component.
    pub red: i16,
    /// Green component.
    pub green: i16,
    /// Blue component.
    pub blue: i16,
}

impl Light {
    /// Construct a light value.
    pub const fn new(red: i16, green: i16, blue: i16) -> Self {
        Self { red, green, blue }
    }

    /// Sum of the positive components.
    pub fn intensity(&self) -> i32 {
        [self.red, self.green, self.blue]
            .iter()
            .map(|&c| i32::from(c.max(0)))
            .sum()
    }
}

/// Read-only view of lighting and cell appearance.
pub trait LightingQuery {
    /// Light falling on the cell this turn.
    fn light_at(&self, pos: Pos) -> Light;

    /// Light that fell on the cell last turn.
    fn old_light_at(&self, pos: Pos) -> Light;

    /// Whether the cell's colours shimmer from turn to turn.
    fn color_dances(&self, pos: Pos) -> bool;

    /// Description of the highest-priority layer in the cell carrying any of
    /// `flags`, for discovery messages.
    fn layer_description(&self, pos: Pos, flags: TerrainMechFlags) -> Option<String>;
}

/// Colour family of a discovery message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageColor {
    /// An item was spotted.
    Item,
    /// Terrain was spotted.
    Background,
}

/// Side effects requested by a visibility update.
pub trait VisionEffects {
    /// Mark the cell discovered.
    fn discover_cell(&mut self, pos: Pos);

    /// Redraw the cell.
    fn refresh_dungeon_cell(&mut self, pos: Pos);

    /// Record the cell's current appearance as the remembered one.
    fn store_memories(&mut self, pos: Pos);

    /// Invalidate the cell's remembered appearance.
    fn clear_stable_memory(&mut self, pos: Pos);

    /// Show a message to the player.
    fn message_with_color(&mut self, text: &str, color: MessageColor);
}
