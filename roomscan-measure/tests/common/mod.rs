#![allow(dead_code)]

use roomscan_core::{
    AnchorHandle, CameraFrame, CameraToWorld, DetachError, HitCandidate, Pose, ScreenPoint,
    TrackableKind, TrackingAdapter, TrackingState, WorldPoint,
};
use std::f64::consts::FRAC_PI_2;

/// Anchor minted by the fake runtime: frozen at the hit position.
pub struct FakeAnchor {
    point: WorldPoint,
}

impl AnchorHandle for FakeAnchor {
    fn world_point(&self) -> WorldPoint {
        self.point
    }
}

/// Scripted stand-in for a tracking runtime. The camera sits at the origin
/// looking down -Z with a 90° vertical fov, so with a square 1000 px
/// viewport a point at depth 5 projects to `(x / 5 + 1) * 500` pixels.
pub struct FakeTracker {
    pub frame: CameraFrame,
    pub hits: Vec<HitCandidate>,
    pub created: usize,
    pub detached: usize,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            frame: CameraFrame {
                pose: CameraToWorld::identity(),
                fov_y: FRAC_PI_2,
                tracking: TrackingState::Tracking,
            },
            hits: Vec::new(),
            created: 0,
            detached: 0,
        }
    }

    /// Scripts the depth sensor to report a hit at `point` from now on.
    pub fn aim(&mut self, point: WorldPoint) {
        self.hits = vec![depth_hit(point)];
    }
}

pub fn depth_hit(point: WorldPoint) -> HitCandidate {
    HitCandidate {
        point,
        tracking: TrackingState::Tracking,
        kind: TrackableKind::DepthPoint,
    }
}

impl TrackingAdapter for FakeTracker {
    type Anchor = FakeAnchor;

    fn camera_frame(&self) -> CameraFrame {
        self.frame
    }

    fn hit_test(&mut self, _point: ScreenPoint) -> Vec<HitCandidate> {
        self.hits.clone()
    }

    fn create_anchor(&mut self, hit: &HitCandidate) -> FakeAnchor {
        self.created += 1;
        FakeAnchor { point: hit.point }
    }

    fn detach_anchor(&mut self, _anchor: FakeAnchor) -> Result<(), DetachError> {
        self.detached += 1;
        Ok(())
    }
}
