//! Distance and cost sentinels shared by every grid consumer.
//!
//! A *cost grid* holds a positive per-cell entry cost or one of the two
//! blocking sentinels below. A *distance grid* holds the cheapest known
//! cost-to-reach or [`MAX_DISTANCE`] for cells no source has reached.

/// Distance value of a cell that no source has reached.
pub const MAX_DISTANCE: i16 = 30000;

/// The cell can never be entered, but a diagonal move that clips its
/// corner is still allowed.
pub const PDS_FORBIDDEN: i16 = -1;

/// The cell can never be entered, and any diagonal move that would clip its
/// corner is blocked as well.
pub const PDS_OBSTRUCTION: i16 = -2;

/// Whether a cost-grid value allows the cell to be entered.
///
/// Both sentinels, and any other non-positive value, forbid entry.
#[inline]
pub const fn is_passable_cost(cost: i16) -> bool {
    cost > 0
}
