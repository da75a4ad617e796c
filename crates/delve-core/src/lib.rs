//! Core types and traits for the Delve spatial-reasoning engine.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental vocabulary shared by the grid, navigation, and vision crates:
//! positions and directions, distance sentinels, terrain/cell/creature flag
//! sets, the read-only views handed out by the game state, the collaborator
//! traits the engine consumes, and configuration structs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cost;
pub mod creature;
pub mod flags;
pub mod pos;
pub mod traits;

pub use config::{ConfigError, CostConfig, SafetyConfig, VisionConfig};
pub use cost::{is_passable_cost, MAX_DISTANCE, PDS_FORBIDDEN, PDS_OBSTRUCTION};
pub use creature::{CreatureId, CreatureState, CreatureView, ItemView, StatusEffects};
pub use flags::{
    CellFlags, ItemFlags, MonsterFlags, TerrainFlags, TerrainMechFlags, VisibilityFlags,
};
pub use pos::{Direction, Pos, DCOLS, DROWS, FP_BASE, FP_FACTOR};
pub use traits::{
    CreatureQuery, LevelQuery, Light, LightingQuery, MessageColor, TerrainQuery, VisionEffects,
};
