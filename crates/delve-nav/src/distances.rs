//! Travel distances to a destination.

use delve_core::{CreatureView, LevelQuery, Pos, TerrainFlags, MAX_DISTANCE};
use delve_grid::{Grid, Topology};

use crate::cost_map::CostMapBuilder;
use crate::dijkstra::{dijkstra_scan, ScanStats};

/// Fill `distances` with the travel distance from every cell to `dest`.
///
/// The cost map follows
/// [`CostMapBuilder::populate_for_travel`]; `blocking` names the terrain
/// the route must avoid, and `traveler`, when given, contributes its own
/// avoidances and, for the player, the rule that unknown cells obstruct.
pub fn calculate_distances<L: LevelQuery + ?Sized>(
    level: &L,
    distances: &mut Grid,
    dest: Pos,
    blocking: TerrainFlags,
    traveler: Option<&CreatureView>,
    can_use_secret_doors: bool,
    topology: Topology,
) -> ScanStats {
    let mut costs = distances.clone();
    CostMapBuilder::default().populate_for_travel(
        level,
        traveler,
        blocking,
        can_use_secret_doors,
        &mut costs,
    );

    distances.fill(MAX_DISTANCE);
    distances.set(dest, 0);
    dijkstra_scan(distances, Some(&costs), topology)
}
