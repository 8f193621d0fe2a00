//! # Roomscan Core
//!
//! This library provides the common abstractions and types shared by every
//! crate in the roomscan measurement engine: typed world/camera/screen
//! points, camera poses, the trackable and hit-candidate model, and the
//! adapter traits a host tracking runtime implements to drive a measurement
//! session.
//!
//! The engine itself lives in `roomscan-measure`; projection onto the device
//! viewport lives in `roomscan-viewport`. Both depend only on the types
//! defined here, so a new runtime host (an AR session, a scripted replay, a
//! test double) only has to implement [`TrackingAdapter`] and
//! [`AnchorHandle`] to run the whole pipeline.
//!
//! ## Coordinate frames
//!
//! World space is right-handed with +Y up; units are meters, as reported by
//! tracking runtimes. Camera space follows the same OpenGL-style convention
//! the runtimes expose: +X right, +Y up, and the camera looking down -Z.
//! Screen space is in pixels with +Y down and the origin at the top-left of
//! the viewport.
//!
//! The crate is designed to work with `#![no_std]`. Math that is not present
//! in `core` goes through [`num-traits`](num_traits) (backed by `libm`).

#![no_std]

extern crate alloc;

mod adapter;
mod camera;
mod point;
mod pose;
mod trackable;

pub use adapter::*;
pub use camera::*;
pub use nalgebra;
pub use point::*;
pub use pose::*;
pub use trackable::*;
