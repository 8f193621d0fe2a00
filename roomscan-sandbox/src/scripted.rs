//! A scripted stand-in for a real tracking runtime.
//!
//! The camera stands at eye height in the middle of a rectangular room and
//! can be aimed at any world point. Hit tests report the aimed point as a
//! depth sample together with a floor-plane candidate, so arbitration runs
//! against a realistic mix.

use roomscan_core::nalgebra::{Rotation3, Vector3};
use roomscan_core::{
    AnchorHandle, CameraFrame, CameraToWorld, DetachError, HitCandidate, Pose, ScreenPoint,
    TrackableKind, TrackingAdapter, TrackingState, WorldPoint,
};

const EYE_HEIGHT: f64 = 1.6;

/// Anchor minted by the scripted runtime.
pub struct ScriptedAnchor {
    point: WorldPoint,
}

impl AnchorHandle for ScriptedAnchor {
    fn world_point(&self) -> WorldPoint {
        self.point
    }
}

/// Simulated tracked camera in a `width` by `depth` room of the given
/// height, with one corner of the floor at the world origin.
pub struct ScriptedTracker {
    eye: Vector3<f64>,
    target: WorldPoint,
    fov_y: f64,
    corners: Vec<WorldPoint>,
    floor: WorldPoint,
    ceiling: WorldPoint,
    live_anchors: usize,
}

impl ScriptedTracker {
    pub fn new(width: f64, depth: f64, height: f64, fov_y: f64) -> Self {
        let corners = vec![
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(width, 0.0, 0.0),
            WorldPoint::new(width, 0.0, depth),
            WorldPoint::new(0.0, 0.0, depth),
        ];
        let center_x = width * 0.5;
        let center_z = depth * 0.5;
        Self {
            eye: Vector3::new(center_x, EYE_HEIGHT, center_z),
            target: corners[0],
            fov_y,
            floor: WorldPoint::new(center_x, 0.0, center_z),
            ceiling: WorldPoint::new(center_x, height, center_z),
            corners,
            live_anchors: 0,
        }
    }

    /// The floor corners in walkthrough order.
    pub fn corner_route(&self) -> Vec<WorldPoint> {
        self.corners.clone()
    }

    /// The point on the floor under the camera, for the height measurement.
    pub fn floor_reference(&self) -> WorldPoint {
        self.floor
    }

    /// The point on the ceiling above the camera, for the height measurement.
    pub fn ceiling_reference(&self) -> WorldPoint {
        self.ceiling
    }

    /// Turns the camera so `point` sits on the reticle.
    pub fn aim_at(&mut self, point: WorldPoint) {
        self.target = point;
    }

    fn rotation(&self) -> Rotation3<f64> {
        let toward = self.target.coords - self.eye;
        // The camera looks down -Z, so local +Z faces away from the target.
        Rotation3::face_towards(&-toward, &Vector3::y())
    }
}

impl TrackingAdapter for ScriptedTracker {
    type Anchor = ScriptedAnchor;

    fn camera_frame(&self) -> CameraFrame {
        CameraFrame {
            pose: CameraToWorld::from_parts(self.eye, self.rotation()),
            fov_y: self.fov_y,
            tracking: TrackingState::Tracking,
        }
    }

    fn hit_test(&mut self, _point: ScreenPoint) -> Vec<HitCandidate> {
        vec![
            // The floor reads as a horizontal plane under every ray; the
            // aimed target comes back as a depth sample and wins arbitration.
            HitCandidate {
                point: self.floor,
                tracking: TrackingState::Tracking,
                kind: TrackableKind::HorizontalPlane { pose_in_polygon: true },
            },
            HitCandidate {
                point: self.target,
                tracking: TrackingState::Tracking,
                kind: TrackableKind::DepthPoint,
            },
        ]
    }

    fn create_anchor(&mut self, hit: &HitCandidate) -> ScriptedAnchor {
        self.live_anchors += 1;
        ScriptedAnchor { point: hit.point }
    }

    fn detach_anchor(&mut self, _anchor: ScriptedAnchor) -> Result<(), DetachError> {
        if self.live_anchors == 0 {
            return Err(DetachError);
        }
        self.live_anchors -= 1;
        Ok(())
    }
}
