//! # `roomscan`
//!
//! Batteries-included room measurement engine.
//!
//! This crate re-exports the roomscan member crates in one place for
//! discoverability and for quickly wiring up a measurement flow. If you are
//! building a production host, import the member crates individually and
//! enable only what you need.
//!
//! All of the core types (points, poses, hit candidates, the
//! [`TrackingAdapter`] seam) live in the root of the crate. Modules hold the
//! functional layers:
//!
//! ## Modules
//! * [`viewport`] - projection of world-space points onto the device viewport
//! * [`measure`] - the checkpointed measurement session, hit arbitration,
//!   snap resolution, and room-geometry export

#![no_std]

pub use roomscan_core::*;

/// Viewport projection (world space to screen pixels)
#[cfg(feature = "roomscan-viewport")]
pub mod viewport {
    pub use roomscan_viewport::*;
}

/// Measurement session, snapping, and export
#[cfg(feature = "roomscan-measure")]
pub mod measure {
    pub use roomscan_measure::*;
}
