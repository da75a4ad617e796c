//! Navigation grids for Delve: distance scans, cost maps, and safety maps.
//!
//! # Per-turn flow
//!
//! 1. [`CostMapBuilder`] translates terrain, occupancy and status into a
//!    cost grid.
//! 2. [`dijkstra_scan`] relaxes a seeded distance grid against it.
//! 3. [`next_step`] descends the result one cell at a time.
//! 4. [`LevelMaps`] owns the level-scoped safety-family grids and rebuilds
//!    each at most once per turn, when first requested.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cost_map;
pub mod dijkstra;
pub mod distances;
pub mod level;
pub mod safety;
pub mod step;

pub use cost_map::{generic_cell_cost, CostMapBuilder};
pub use dijkstra::{default_cost_grid, dijkstra_scan, dijkstra_scan_with_terrain, ScanStats};
pub use distances::calculate_distances;
pub use level::{LevelMaps, LevelMapsBuilder};
pub use safety::{MapKind, SafetyMapEngine};
pub use step::{diagonal_blocked, next_step};
