//! Read-only creature and item views handed out by the game state.
//!
//! The engine never owns creatures. Query traits return borrowed
//! [`CreatureView`]s that describe exactly the state the navigation and
//! vision algorithms consult.

use std::fmt;

use crate::flags::{ItemFlags, MonsterFlags};
use crate::pos::Pos;

/// Stable identifier of a creature on the current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Identifier reserved for the player.
    pub const PLAYER: CreatureId = CreatureId(0);
}

impl From<u32> for CreatureId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// Allegiance of a creature relative to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CreatureState {
    /// The player character.
    Player,
    /// A monster following the player.
    Ally,
    /// Any other monster.
    Hostile,
}

/// Temporary status durations, in turns remaining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatusEffects {
    /// Turns of levitation left.
    pub levitating: i16,
    /// Turns of fire immunity left.
    pub immune_to_fire: i16,
}

impl StatusEffects {
    /// The longer of the two protective statuses.
    pub fn longest_protection(&self) -> i16 {
        self.levitating.max(self.immune_to_fire)
    }
}

/// Snapshot of the creature state consulted by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatureView {
    /// Identity.
    pub id: CreatureId,
    /// Current cell.
    pub loc: Pos,
    /// Intrinsic abilities.
    pub info_flags: MonsterFlags,
    /// Allegiance.
    pub state: CreatureState,
    /// Temporary statuses.
    pub status: StatusEffects,
    /// Time to move one cell, where 100 is normal speed.
    pub movement_duration: i16,
    /// Consecutive turns spent without moving.
    pub turns_spent_stationary: i16,
    /// Shackled and waiting to be freed.
    pub captive: bool,
    /// Currently revealed to the player by telepathy.
    pub telepathically_revealed: bool,
}

impl CreatureView {
    /// A normal-speed creature with no flags or statuses.
    pub fn new(id: CreatureId, loc: Pos, state: CreatureState) -> Self {
        Self {
            id,
            loc,
            info_flags: MonsterFlags::empty(),
            state,
            status: StatusEffects::default(),
            movement_duration: 100,
            turns_spent_stationary: 0,
            captive: false,
            telepathically_revealed: false,
        }
    }

    /// The player standing at `loc`.
    pub fn player(loc: Pos) -> Self {
        Self::new(CreatureId::PLAYER, loc, CreatureState::Player)
    }

    /// Replace the intrinsic flags.
    pub fn with_flags(mut self, flags: MonsterFlags) -> Self {
        self.info_flags = flags;
        self
    }

    /// Replace the temporary statuses.
    pub fn with_status(mut self, status: StatusEffects) -> Self {
        self.status = status;
        self
    }

    /// Replace the movement duration.
    pub fn with_movement_duration(mut self, duration: i16) -> Self {
        self.movement_duration = duration;
        self
    }

    /// Replace the stationary-turn counter.
    pub fn with_turns_stationary(mut self, turns: i16) -> Self {
        self.turns_spent_stationary = turns;
        self
    }

    /// Mark the creature captive or free.
    pub fn with_captive(mut self, captive: bool) -> Self {
        self.captive = captive;
        self
    }

    /// Mark the creature telepathically revealed or not.
    pub fn with_telepathy(mut self, revealed: bool) -> Self {
        self.telepathically_revealed = revealed;
        self
    }

    /// Whether this is the player.
    pub fn is_player(&self) -> bool {
        self.state == CreatureState::Player
    }

    /// Whether this is a monster allied with the player.
    pub fn is_ally(&self) -> bool {
        self.state == CreatureState::Ally
    }

    /// Whether this is a monster not allied with the player.
    pub fn is_hostile(&self) -> bool {
        self.state == CreatureState::Hostile
    }

    /// Whether the creature has every flag in `flags`.
    pub fn has_flags(&self, flags: MonsterFlags) -> bool {
        self.info_flags.contains(flags)
    }

    /// Whether no attack can damage the creature.
    pub fn is_damage_immune(&self) -> bool {
        self.info_flags
            .intersects(MonsterFlags::IMMUNE_TO_WEAPONS | MonsterFlags::INVULNERABLE)
    }

    /// Whether the creature never takes ordinary movement turns.
    pub fn is_immobile(&self) -> bool {
        self.info_flags
            .intersects(MonsterFlags::IMMOBILE | MonsterFlags::GETS_TURN_ON_ACTIVATION)
    }
}

/// An item lying in a cell, as seen by travel and discovery messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView {
    /// Display name used in "you see" messages.
    pub name: String,
    /// Item properties.
    pub flags: ItemFlags,
}

impl ItemView {
    /// Construct an item view.
    pub fn new(name: impl Into<String>, flags: ItemFlags) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }
}
