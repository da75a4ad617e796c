//! Delve: distance maps, flee maps and field of view for grid roguelikes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Delve sub-crates. Most users only need `delve` as a dependency.
//!
//! # Quick start
//!
//! ```rust
//! use delve::prelude::*;
//!
//! // Distances from the centre of an open 11×11 room.
//! let mut distance = Grid::filled(11, 11, MAX_DISTANCE).unwrap();
//! let costs = Grid::filled(11, 11, 1).unwrap();
//! distance.set(Pos::new(5, 5), 0);
//! dijkstra_scan(&mut distance, Some(&costs), Topology::EightWay);
//!
//! assert_eq!(distance.get(Pos::new(0, 0)), 5);
//! assert_eq!(distance.get(Pos::new(5, 9)), 4);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `delve-core` | Positions, flags, creature views, configs, host traits |
//! | [`grid`] | `delve-grid` | Distance grids, cell masks, neighbourhoods |
//! | [`nav`] | `delve-nav` | Cost maps, Dijkstra scans, safety maps, stepping |
//! | [`vision`] | `delve-vision` | Field of view and per-turn visibility |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Positions, flags, creature views, configs and host traits (`delve-core`).
///
/// The host game implements [`types::TerrainQuery`],
/// [`types::CreatureQuery`], [`types::LightingQuery`] and
/// [`types::VisionEffects`] over its own level representation.
pub use delve_core as types;

/// Grid storage (`delve-grid`).
///
/// [`grid::Grid`] holds one `i16` per cell; [`grid::CellMask`] one bit.
pub use delve_grid as grid;

/// Navigation (`delve-nav`).
///
/// Build cost maps with [`nav::CostMapBuilder`], relax them with
/// [`nav::dijkstra_scan`], and keep per-level flee maps in
/// [`nav::LevelMaps`].
pub use delve_nav as nav;

/// Field of view and visibility (`delve-vision`).
///
/// [`vision::VisibilityUpdater`] refreshes a [`vision::VisionState`] once
/// per player move.
pub use delve_vision as vision;

/// Common imports for typical Delve usage.
///
/// ```rust
/// use delve::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use delve_core::{
        CellFlags, CreatureId, CreatureQuery, CreatureState, CreatureView, Direction, LevelQuery,
        LightingQuery, Pos, TerrainFlags, TerrainQuery, VisibilityFlags, VisionEffects,
    };

    // Costs
    pub use delve_core::{MAX_DISTANCE, PDS_FORBIDDEN, PDS_OBSTRUCTION};

    // Config and errors
    pub use delve_core::{ConfigError, CostConfig, SafetyConfig, VisionConfig};
    pub use delve_grid::GridError;

    // Grids
    pub use delve_grid::{CellMask, Grid, Topology};

    // Navigation
    pub use delve_nav::{
        calculate_distances, dijkstra_scan, next_step, CostMapBuilder, LevelMaps, MapKind,
    };

    // Vision
    pub use delve_vision::{Observer, UpdateReport, VisibilityUpdater, VisionHost, VisionState};
}
