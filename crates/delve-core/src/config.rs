//! Tuning constants for cost maps, safety maps, and visibility, with
//! validation.
//!
//! Every struct's [`Default`] carries the tuned values the algorithms were
//! calibrated with. [`validate()`](SafetyConfig::validate) rejects values
//! that would make a computation ill-defined.

use std::error::Error;
use std::fmt;

// ── CostConfig ─────────────────────────────────────────────────────

/// Per-cell costs used by creature-specific cost maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostConfig {
    /// Cost of a known-trap-free cell, and of every cell for hostile
    /// movers. Default: 10.
    pub trap_free_cost: i16,
    /// Base cost of a cell that may hide a trap. Default: 10.
    pub unexplored_base: i16,
    /// Depth below which the unexplored surcharge is zero. Default: 5.
    pub unexplored_min_depth: i16,
    /// Depth above which the unexplored surcharge stops growing. Default: 15.
    pub unexplored_max_depth: i16,
    /// Surcharge per level past `unexplored_min_depth`. Default: 2.
    pub unexplored_depth_step: i16,
    /// Added to harmful terrain for animate movers. Default: 10.
    pub hazard_penalty: i16,
    /// Added to cells holding an item the player avoids. Default: 10.
    pub avoided_item_penalty: i16,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            trap_free_cost: 10,
            unexplored_base: 10,
            unexplored_min_depth: 5,
            unexplored_max_depth: 15,
            unexplored_depth_step: 2,
            hazard_penalty: 10,
            avoided_item_penalty: 10,
        }
    }
}

impl CostConfig {
    /// Cost of a cell that is not known to be trap-free at `depth`.
    pub fn unexplored_cost(&self, depth: i16) -> i16 {
        let clamped = depth.clamp(self.unexplored_min_depth, self.unexplored_max_depth);
        self.unexplored_base + (clamped - self.unexplored_min_depth) * self.unexplored_depth_step
    }

    /// Check that every cost is positive and the depth band is ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trap_free_cost <= 0 {
            return Err(ConfigError::NonPositive {
                field: "trap_free_cost",
                value: i32::from(self.trap_free_cost),
            });
        }
        if self.unexplored_base <= 0 {
            return Err(ConfigError::NonPositive {
                field: "unexplored_base",
                value: i32::from(self.unexplored_base),
            });
        }
        if self.unexplored_min_depth > self.unexplored_max_depth {
            return Err(ConfigError::InvertedRange {
                min: i32::from(self.unexplored_min_depth),
                max: i32::from(self.unexplored_max_depth),
            });
        }
        if self.unexplored_depth_step < 0 {
            return Err(ConfigError::Negative {
                field: "unexplored_depth_step",
                value: i32::from(self.unexplored_depth_step),
            });
        }
        if self.hazard_penalty < 0 {
            return Err(ConfigError::Negative {
                field: "hazard_penalty",
                value: i32::from(self.hazard_penalty),
            });
        }
        if self.avoided_item_penalty < 0 {
            return Err(ConfigError::Negative {
                field: "avoided_item_penalty",
                value: i32::from(self.avoided_item_penalty),
            });
        }
        Ok(())
    }
}

// ── SafetyConfig ───────────────────────────────────────────────────

/// Constants of the transform applied between the two safety-map scans.
///
/// A reached distance `v` (unreached cells first clamped to
/// `unreached_clamp`) becomes `-(inversion_factor * (knee * v / (knee + v)))`,
/// minus `loop_bonus` on looped cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SafetyConfig {
    /// Stand-in distance for unreached cells. Default: 150.
    pub unreached_clamp: i32,
    /// Compression knee of the saturating curve. Default: 50.
    pub knee: i32,
    /// Multiplier applied when inverting distance into safety. Default: 3.
    pub inversion_factor: i32,
    /// Extra safety of looped cells. Default: 10.
    pub loop_bonus: i32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            unreached_clamp: 150,
            knee: 50,
            inversion_factor: 3,
            loop_bonus: 10,
        }
    }
}

impl SafetyConfig {
    /// Map a reachability distance to its pre-repulsion safety value.
    pub fn transform(&self, distance: i16, in_loop: bool) -> i16 {
        let mut v = i32::from(distance);
        if distance == crate::cost::MAX_DISTANCE {
            v = self.unreached_clamp;
        }
        v = self.knee * v / (self.knee + v);
        v *= -self.inversion_factor;
        if in_loop {
            v -= self.loop_bonus;
        }
        v as i16
    }

    /// Check that the curve is well-defined and fits the grid's range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.knee <= 0 {
            return Err(ConfigError::NonPositive {
                field: "knee",
                value: self.knee,
            });
        }
        if self.inversion_factor <= 0 {
            return Err(ConfigError::NonPositive {
                field: "inversion_factor",
                value: self.inversion_factor,
            });
        }
        if self.unreached_clamp < 0 {
            return Err(ConfigError::Negative {
                field: "unreached_clamp",
                value: self.unreached_clamp,
            });
        }
        if self.loop_bonus < 0 {
            return Err(ConfigError::Negative {
                field: "loop_bonus",
                value: self.loop_bonus,
            });
        }
        // The curve saturates below `knee`, so this bounds every output.
        let floor = -(self.inversion_factor as i64 * self.knee as i64) - self.loop_bonus as i64;
        if floor < i64::from(i16::MIN) {
            return Err(ConfigError::OutOfRange {
                field: "inversion_factor",
                value: self.inversion_factor,
            });
        }
        Ok(())
    }
}

// ── VisionConfig ───────────────────────────────────────────────────

/// Constants of the per-turn visibility update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisionConfig {
    /// A lit cell is visible when its light intensity exceeds this.
    /// Default: 50.
    pub visibility_threshold: i32,
    /// During automation, dancing colours refresh every this many turns.
    /// Default: 5.
    pub dancing_cadence: u64,
    /// Radius of the field of view opened around a telepathically revealed
    /// creature. Default: 2.
    pub telepathy_radius: i32,
    /// Added to a positive clairvoyance level to get the reveal radius.
    /// Default: 10.
    pub clairvoyance_bonus: i32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 50,
            dancing_cadence: 5,
            telepathy_radius: 2,
            clairvoyance_bonus: 10,
        }
    }
}

impl VisionConfig {
    /// Check that the cadence and radii are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dancing_cadence == 0 {
            return Err(ConfigError::NonPositive {
                field: "dancing_cadence",
                value: 0,
            });
        }
        if self.telepathy_radius < 0 {
            return Err(ConfigError::Negative {
                field: "telepathy_radius",
                value: self.telepathy_radius,
            });
        }
        if self.clairvoyance_bonus < 0 {
            return Err(ConfigError::Negative {
                field: "clairvoyance_bonus",
                value: self.clairvoyance_bonus,
            });
        }
        if self.visibility_threshold < 0 {
            return Err(ConfigError::Negative {
                field: "visibility_threshold",
                value: self.visibility_threshold,
            });
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by the `validate()` methods in this module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A field that must be strictly positive was zero or negative.
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },
    /// A field that must be non-negative was negative.
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },
    /// A `min`/`max` pair was inverted.
    InvertedRange {
        /// Configured lower bound.
        min: i32,
        /// Configured upper bound.
        max: i32,
    },
    /// A field would push computed values outside the 16-bit grid range.
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::InvertedRange { min, max } => {
                write!(f, "depth range inverted: min {min} > max {max}")
            }
            Self::OutOfRange { field, value } => {
                write!(f, "{field} = {value} overflows the grid value range")
            }
        }
    }
}

impl Error for ConfigError {}
