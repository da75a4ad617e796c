//! Error types for grid construction.

use std::fmt;

/// Errors arising from building a grid out of caller-supplied data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The supplied data or the other grid does not match the dimensions.
    DimensionMismatch {
        /// `(width, height)` the operation required.
        expected: (usize, usize),
        /// What was supplied: a cell count for raw data, else `width * height`.
        got: usize,
    },
    /// Attempted to construct a grid with zero cells.
    EmptyGrid,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, got } => write!(
                f,
                "expected {}x{} = {} cells, got {got}",
                expected.0,
                expected.1,
                expected.0 * expected.1
            ),
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
        }
    }
}

impl std::error::Error for GridError {}
