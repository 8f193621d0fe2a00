use crate::WorldPoint;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Tracking lifecycle of the camera or of a trackable surface, as reported
/// by the host runtime this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum TrackingState {
    /// Actively tracked; poses are trustworthy this tick.
    Tracking,
    /// Tracking is interrupted (for instance the camera is covered) but may
    /// resume; poses are stale.
    Paused,
    /// The trackable is gone and will not come back.
    Stopped,
}

impl TrackingState {
    pub fn is_tracking(self) -> bool {
        self == Self::Tracking
    }
}

/// The kind of trackable a hit-test ray intersected.
///
/// This is a closed set: arbitration matches it exhaustively, so a new kind
/// is a compile error at every decision point rather than a silently ignored
/// runtime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum TrackableKind {
    /// A sample from the depth image. The most accurate source available.
    DepthPoint,
    /// A detected vertical planar surface, i.e. a wall.
    VerticalPlane {
        /// Whether the hit pose lies inside the plane's measured polygon.
        pose_in_polygon: bool,
    },
    /// A detected horizontal planar surface, i.e. a floor or a tabletop.
    HorizontalPlane {
        /// Whether the hit pose lies inside the plane's measured polygon.
        pose_in_polygon: bool,
    },
    /// A visual feature point. Only trusted near the camera.
    FeaturePoint,
}

/// One trackable intersection reported by the runtime at a screen
/// coordinate. The runtime resolves the pose, the tracking state, and (for
/// planes) the polygon containment before handing candidates over.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HitCandidate {
    /// World-space position of the intersection.
    pub point: WorldPoint,
    /// Tracking state of the trackable that produced the intersection.
    pub tracking: TrackingState,
    /// What was hit.
    pub kind: TrackableKind,
}
