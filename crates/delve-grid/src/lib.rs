//! Dense grids for Delve.
//!
//! This crate defines the flat row-major [`Grid`] that carries both cost and
//! distance values, its boolean sibling [`CellMask`] used for field-of-view
//! masks, and the [`Topology`] selector shared by every scan.
//!
//! # Storage
//!
//! Cells are stored in a single `Vec` indexed `y * width + x`. Out-of-range
//! coordinates are a caller error and panic on slice indexing; no `Result`
//! is returned from cell accessors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod mask;
pub mod topology;

pub use error::GridError;
pub use grid::Grid;
pub use mask::CellMask;
pub use topology::Topology;
