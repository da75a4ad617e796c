//! Field of view and per-turn visibility for Delve.
//!
//! A [`VisionState`] holds the [`VisibilityFlags`](delve_core::VisibilityFlags)
//! of every cell on a level. Once per player move the
//! [`VisibilityUpdater`] shifts last turn's flags into their shadows, casts
//! the player's field of view through a [`FovCaster`], layers clairvoyance
//! and telepathy on top, applies lighting, and then drives discovery,
//! memory and refresh side effects through the host's
//! [`VisionEffects`](delve_core::VisionEffects).
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`fov`] | [`FovCaster`], [`FovQuery`], [`ShadowcastFov`] |
//! | [`state`] | [`VisionState`] |
//! | [`clairvoyance`] | reveal and darkening discs |
//! | [`telepathy`] | sight around revealed creatures |
//! | [`updater`] | [`VisibilityUpdater`], [`Observer`], [`UpdateReport`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clairvoyance;
pub mod fov;
pub mod state;
pub mod telepathy;
pub mod updater;

pub use clairvoyance::{clairvoyance_radius, in_clairvoyance_disc};
pub use fov::{FovCaster, FovQuery, ShadowcastFov};
pub use state::VisionState;
pub use updater::{Observer, UpdateReport, VisibilityUpdater, VisionHost};
