use crate::{CameraToWorld, TrackingState};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The camera sample for one tick: pose, projection parameters, and tracking
/// state, as supplied by the tracking runtime.
///
/// A frame is only valid for the tick it was fetched on. Reprojection and
/// hit arbitration within a tick must use the same frame so screen points
/// and world poses agree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraFrame {
    /// Where the camera sits and points in world space.
    pub pose: CameraToWorld,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Whether the camera is actively tracking this tick.
    pub tracking: TrackingState,
}

impl CameraFrame {
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_tracking()
    }
}
