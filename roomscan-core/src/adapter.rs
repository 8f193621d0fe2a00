use crate::{CameraFrame, HitCandidate, ScreenPoint, WorldPoint};
use alloc::vec::Vec;
use core::fmt;

/// A handle to an anchor owned by the tracking runtime.
///
/// An anchor gives a placed measurement point stable identity: the runtime
/// keeps refining its estimate of where the anchor is, and `world_point`
/// returns the current best estimate. Handles are created by
/// [`TrackingAdapter::create_anchor`] and released exactly once by
/// [`TrackingAdapter::detach_anchor`]; they are never mutated in between.
pub trait AnchorHandle {
    /// The anchor's current world-space position.
    fn world_point(&self) -> WorldPoint;
}

/// The seam between the measurement engine and a host tracking runtime.
///
/// One implementation exists per host: a live AR session on a device, or a
/// scripted double in tests and sandboxes. All calls happen on the single
/// logical thread that drives the tick loop; implementations may block but
/// are never invoked concurrently.
pub trait TrackingAdapter {
    type Anchor: AnchorHandle;

    /// The camera pose, projection parameters, and tracking state for the
    /// current tick.
    fn camera_frame(&self) -> CameraFrame;

    /// The unordered trackable intersections under `point`, with tracking
    /// state and polygon containment already resolved. May be empty.
    fn hit_test(&mut self, point: ScreenPoint) -> Vec<HitCandidate>;

    /// Creates an anchor pinned to the candidate's pose. The caller takes
    /// ownership of the handle and is responsible for detaching it.
    fn create_anchor(&mut self, hit: &HitCandidate) -> Self::Anchor;

    /// Releases an anchor back to the runtime. Detachment is terminal; a
    /// second detach of the same underlying resource is a caller bug which
    /// the runtime reports as [`DetachError`].
    fn detach_anchor(&mut self, anchor: Self::Anchor) -> Result<(), DetachError>;
}

/// Returned when the tracking runtime refused to release an anchor.
///
/// Under correct sequencing this never happens; callers log it as a defect
/// and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachError;

impl fmt::Display for DetachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracking runtime refused to detach the anchor")
    }
}
