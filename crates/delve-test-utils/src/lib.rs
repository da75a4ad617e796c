//! Test utilities and mock dungeons for Delve development.
//!
//! [`MockDungeon`] implements every collaborator trait ([`TerrainQuery`],
//! [`CreatureQuery`], [`LightingQuery`], [`VisionEffects`]) over plain
//! vectors, with chainable layout builders for walls, doors, lethal terrain,
//! sacred glyphs and loops. Side effects requested by a visibility update
//! are applied to the cell knowledge flags and recorded as
//! [`VisionEvent`]s for assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod layouts;

use indexmap::IndexMap;

use delve_core::{
    CellFlags, CreatureId, CreatureQuery, CreatureView, ItemView, Light, LightingQuery,
    MessageColor, MonsterFlags, Pos, TerrainFlags, TerrainMechFlags, TerrainQuery,
    VisionEffects, DCOLS, DROWS,
};

/// Terrain flags of an ordinary granite wall.
pub const WALL: TerrainFlags = TerrainFlags::OBSTRUCTS_PASSABILITY
    .union(TerrainFlags::OBSTRUCTS_VISION)
    .union(TerrainFlags::OBSTRUCTS_ITEMS)
    .union(TerrainFlags::OBSTRUCTS_GAS)
    .union(TerrainFlags::OBSTRUCTS_DIAGONAL_MOVEMENT);

/// Terrain flags of a statue or pillar: impassable and opaque, but its
/// corners can be cut diagonally.
pub const PILLAR: TerrainFlags =
    TerrainFlags::OBSTRUCTS_PASSABILITY.union(TerrainFlags::OBSTRUCTS_VISION);

/// Terrain flags of an open doorway once a secret door is found.
pub const DOORWAY: TerrainFlags = TerrainFlags::OBSTRUCTS_VISION;

/// Light bright enough to see by on every cell of a fresh dungeon.
pub const DAYLIGHT: Light = Light::new(100, 100, 100);

/// One cell of a [`MockDungeon`].
#[derive(Clone, Debug, Default)]
pub struct MockCell {
    pub terrain: TerrainFlags,
    pub tm: TerrainMechFlags,
    /// Flags the cell takes on once its secret is discovered.
    pub discovered_terrain: TerrainFlags,
    pub flags: CellFlags,
    pub permanent_wall: bool,
    pub light: Light,
    pub old_light: Light,
    pub dances: bool,
    pub description: Option<String>,
    pub item: Option<ItemView>,
    pub avoided: bool,
}

/// A side effect recorded by [`MockDungeon`]'s [`VisionEffects`] impl.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisionEvent {
    Discovered(Pos),
    Refreshed(Pos),
    StoredMemory(Pos),
    ClearedStableMemory(Pos),
    Message(String, MessageColor),
}

/// An in-memory dungeon level implementing every collaborator trait.
///
/// Creatures are kept in insertion order so iteration is deterministic.
#[derive(Clone, Debug)]
pub struct MockDungeon {
    width: usize,
    height: usize,
    cells: Vec<MockCell>,
    depth: i16,
    player: CreatureView,
    creatures: IndexMap<CreatureId, CreatureView>,
    passable: Vec<(CreatureId, CreatureId)>,
    events: Vec<VisionEvent>,
}

impl MockDungeon {
    /// An open `width × height` floor, lit, undiscovered, with the player at
    /// the origin and no walls at all.
    pub fn open(width: usize, height: usize) -> Self {
        let cell = MockCell {
            light: DAYLIGHT,
            old_light: DAYLIGHT,
            ..MockCell::default()
        };
        Self {
            width,
            height,
            cells: vec![cell; width * height],
            depth: 1,
            player: CreatureView::player(Pos::new(0, 0)),
            creatures: IndexMap::new(),
            passable: Vec::new(),
            events: Vec::new(),
        }
    }

    /// A standard 79 × 29 room: permanent walls on the border, open floor
    /// inside, the player at `(1, 1)`.
    pub fn standard() -> Self {
        let mut d = Self::open(DCOLS, DROWS);
        for y in 0..DROWS as i32 {
            for x in 0..DCOLS as i32 {
                let p = Pos::new(x, y);
                if x == 0 || y == 0 || x == DCOLS as i32 - 1 || y == DROWS as i32 - 1 {
                    let c = d.cell_mut(p);
                    c.terrain = WALL;
                    c.permanent_wall = true;
                }
            }
        }
        d.player.loc = Pos::new(1, 1);
        d
    }

    fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    pub fn cell(&self, pos: Pos) -> &MockCell {
        &self.cells[self.index(pos)]
    }

    pub fn cell_mut(&mut self, pos: Pos) -> &mut MockCell {
        let i = self.index(pos);
        &mut self.cells[i]
    }

    fn with_terrain(mut self, pos: Pos, terrain: TerrainFlags) -> Self {
        let c = self.cell_mut(pos);
        c.terrain = terrain;
        c.tm = TerrainMechFlags::empty();
        self
    }

    fn add_terrain(mut self, pos: Pos, terrain: TerrainFlags) -> Self {
        self.cell_mut(pos).terrain |= terrain;
        self
    }

    // ── Terrain layouts ─────────────────────────────────────────

    pub fn with_wall(self, pos: Pos) -> Self {
        self.with_terrain(pos, WALL)
    }

    pub fn with_pillar(self, pos: Pos) -> Self {
        self.with_terrain(pos, PILLAR)
    }

    pub fn with_floor(self, pos: Pos) -> Self {
        self.with_terrain(pos, TerrainFlags::empty())
    }

    pub fn with_lava(self, pos: Pos) -> Self {
        self.with_terrain(pos, TerrainFlags::LAVA_INSTA_DEATH)
    }

    pub fn with_deep_water(self, pos: Pos) -> Self {
        self.with_terrain(pos, TerrainFlags::IS_DEEP_WATER)
    }

    pub fn with_chasm(self, pos: Pos) -> Self {
        self.with_terrain(pos, TerrainFlags::AUTO_DESCENT)
    }

    pub fn with_fire(self, pos: Pos) -> Self {
        self.add_terrain(pos, TerrainFlags::IS_FIRE)
    }

    pub fn with_trap(self, pos: Pos) -> Self {
        self.add_terrain(pos, TerrainFlags::IS_DF_TRAP)
    }

    pub fn with_sacred(self, pos: Pos) -> Self {
        self.add_terrain(pos, TerrainFlags::SACRED)
    }

    /// A secret door still disguised as a wall.
    pub fn with_secret_door(mut self, pos: Pos) -> Self {
        let c = self.cell_mut(pos);
        c.terrain = WALL;
        c.tm = TerrainMechFlags::IS_SECRET;
        c.discovered_terrain = DOORWAY;
        self
    }

    /// A layer with a description shown when first seen.
    pub fn with_feature(mut self, pos: Pos, tm: TerrainMechFlags, description: &str) -> Self {
        let c = self.cell_mut(pos);
        c.tm |= tm;
        c.description = Some(description.to_string());
        self
    }

    // ── Cell knowledge ──────────────────────────────────────────

    pub fn with_cell_flags(mut self, pos: Pos, flags: CellFlags) -> Self {
        self.cell_mut(pos).flags |= flags;
        self
    }

    pub fn with_loop(self, pos: Pos) -> Self {
        self.with_cell_flags(pos, CellFlags::IN_LOOP)
    }

    pub fn with_trap_free(self, pos: Pos) -> Self {
        self.with_cell_flags(pos, CellFlags::KNOWN_TO_BE_TRAP_FREE)
    }

    pub fn with_trap_free_everywhere(mut self) -> Self {
        for c in &mut self.cells {
            c.flags |= CellFlags::KNOWN_TO_BE_TRAP_FREE;
        }
        self
    }

    pub fn discover_all(mut self) -> Self {
        for c in &mut self.cells {
            c.flags |= CellFlags::DISCOVERED;
        }
        self
    }

    /// Discover every cell in the inclusive rectangle `a..=b`.
    pub fn with_discovered_rect(mut self, a: Pos, b: Pos) -> Self {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                self.cell_mut(Pos::new(x, y)).flags |= CellFlags::DISCOVERED;
            }
        }
        self
    }

    pub fn with_depth(mut self, depth: i16) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_item(mut self, pos: Pos, item: ItemView) -> Self {
        let c = self.cell_mut(pos);
        c.flags |= CellFlags::HAS_ITEM;
        c.item = Some(item);
        self
    }

    // ── Lighting ────────────────────────────────────────────────

    pub fn with_light(mut self, pos: Pos, light: Light) -> Self {
        self.cell_mut(pos).light = light;
        self
    }

    pub fn with_old_light(mut self, pos: Pos, light: Light) -> Self {
        self.cell_mut(pos).old_light = light;
        self
    }

    /// Set this turn's and last turn's light everywhere.
    pub fn with_ambient_light(mut self, light: Light) -> Self {
        for c in &mut self.cells {
            c.light = light;
            c.old_light = light;
        }
        self
    }

    pub fn with_dancing(mut self, pos: Pos) -> Self {
        self.cell_mut(pos).dances = true;
        self
    }

    // ── Creatures ───────────────────────────────────────────────

    pub fn with_player_at(mut self, pos: Pos) -> Self {
        self.player.loc = pos;
        self
    }

    pub fn with_player(mut self, player: CreatureView) -> Self {
        self.player = player;
        self
    }

    pub fn with_creature(mut self, creature: CreatureView) -> Self {
        self.creatures.insert(creature.id, creature);
        self
    }

    /// Make `mover` able to swap places with `blocker`.
    pub fn with_passable(mut self, mover: CreatureId, blocker: CreatureId) -> Self {
        self.passable.push((mover, blocker));
        self
    }

    /// Make every creature's AI refuse to enter `pos`.
    pub fn with_avoided(mut self, pos: Pos) -> Self {
        self.cell_mut(pos).avoided = true;
        self
    }

    pub fn player_view(&self) -> CreatureView {
        self.player.clone()
    }

    pub fn creature(&self, id: CreatureId) -> Option<&CreatureView> {
        self.creatures.get(&id)
    }

    pub fn move_creature(&mut self, id: CreatureId, to: Pos) {
        if id == self.player.id {
            self.player.loc = to;
        } else if let Some(c) = self.creatures.get_mut(&id) {
            c.loc = to;
        }
    }

    // ── Recorded effects ────────────────────────────────────────

    pub fn events(&self) -> &[VisionEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<VisionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                VisionEvent::Message(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count_events(&self, pred: impl Fn(&VisionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Carry this turn's light into last turn's, as the lighting pass
    /// would at the start of a new turn.
    pub fn age_light(&mut self) {
        for c in &mut self.cells {
            c.old_light = c.light;
        }
    }

    fn side(c: &CreatureView) -> bool {
        !c.is_hostile()
    }
}

impl TerrainQuery for MockDungeon {
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn terrain_flags(&self, pos: Pos) -> TerrainFlags {
        self.cell(pos).terrain
    }

    fn tm_flags(&self, pos: Pos) -> TerrainMechFlags {
        self.cell(pos).tm
    }

    fn discovered_terrain_flags_at(&self, pos: Pos) -> TerrainFlags {
        let c = self.cell(pos);
        if c.tm.contains(TerrainMechFlags::IS_SECRET) {
            c.discovered_terrain
        } else {
            c.terrain
        }
    }

    fn cell_flags(&self, pos: Pos) -> CellFlags {
        self.cell(pos).flags
    }

    fn is_permanent_wall(&self, pos: Pos) -> bool {
        self.cell(pos).permanent_wall
    }

    fn depth_level(&self) -> i16 {
        self.depth
    }

    fn item_at(&self, pos: Pos) -> Option<&ItemView> {
        self.cell(pos).item.as_ref()
    }
}

impl CreatureQuery for MockDungeon {
    fn player(&self) -> &CreatureView {
        &self.player
    }

    fn monster_at(&self, pos: Pos) -> Option<&CreatureView> {
        if self.player.loc == pos {
            return Some(&self.player);
        }
        self.creatures.values().find(|c| c.loc == pos)
    }

    fn creatures(&self) -> Box<dyn Iterator<Item = &CreatureView> + '_> {
        Box::new(self.creatures.values())
    }

    /// Lethal terrain is avoided unless the creature is protected, traps
    /// unless it is airborne, and sacred glyphs by every hostile.
    fn monster_avoids(&self, monst: &CreatureView, pos: Pos) -> bool {
        let c = self.cell(pos);
        if c.avoided {
            return true;
        }
        let airborne = monst.has_flags(MonsterFlags::FLIES) || monst.status.levitating > 0;
        let t = c.terrain;
        if t.contains(TerrainFlags::LAVA_INSTA_DEATH)
            && !airborne
            && monst.status.immune_to_fire == 0
            && !monst
                .info_flags
                .intersects(MonsterFlags::IMMUNE_TO_FIRE | MonsterFlags::INVULNERABLE)
        {
            return true;
        }
        if t.contains(TerrainFlags::IS_DEEP_WATER)
            && !airborne
            && !monst.has_flags(MonsterFlags::IMMUNE_TO_WATER)
        {
            return true;
        }
        if t.intersects(TerrainFlags::AUTO_DESCENT | TerrainFlags::IS_DF_TRAP) && !airborne {
            return true;
        }
        t.contains(TerrainFlags::SACRED) && monst.is_hostile()
    }

    fn monsters_are_enemies(&self, a: &CreatureView, b: &CreatureView) -> bool {
        !a.captive && !b.captive && Self::side(a) != Self::side(b)
    }

    fn monsters_are_teammates(&self, a: &CreatureView, b: &CreatureView) -> bool {
        a.id != b.id && !a.captive && !b.captive && Self::side(a) == Self::side(b)
    }

    fn can_pass(&self, mover: &CreatureView, blocker: &CreatureView) -> bool {
        self.passable.contains(&(mover.id, blocker.id))
            || (mover.is_player() && blocker.is_ally() && !blocker.captive)
    }
}

impl LightingQuery for MockDungeon {
    fn light_at(&self, pos: Pos) -> Light {
        self.cell(pos).light
    }

    fn old_light_at(&self, pos: Pos) -> Light {
        self.cell(pos).old_light
    }

    fn color_dances(&self, pos: Pos) -> bool {
        self.cell(pos).dances
    }

    fn layer_description(&self, pos: Pos, flags: TerrainMechFlags) -> Option<String> {
        let c = self.cell(pos);
        if c.tm.intersects(flags) {
            c.description.clone()
        } else {
            None
        }
    }
}

impl VisionEffects for MockDungeon {
    fn discover_cell(&mut self, pos: Pos) {
        self.cell_mut(pos).flags |= CellFlags::DISCOVERED;
        self.events.push(VisionEvent::Discovered(pos));
    }

    fn refresh_dungeon_cell(&mut self, pos: Pos) {
        self.events.push(VisionEvent::Refreshed(pos));
    }

    fn store_memories(&mut self, pos: Pos) {
        self.cell_mut(pos).flags |= CellFlags::STABLE_MEMORY;
        self.events.push(VisionEvent::StoredMemory(pos));
    }

    fn clear_stable_memory(&mut self, pos: Pos) {
        self.cell_mut(pos).flags -= CellFlags::STABLE_MEMORY;
        self.events.push(VisionEvent::ClearedStableMemory(pos));
    }

    fn message_with_color(&mut self, text: &str, color: MessageColor) {
        self.events.push(VisionEvent::Message(text.to_string(), color));
    }
}
