//! This crate plugs into `roomscan-core` and converts tracked world-space
//! points into viewport pixel coordinates. It is the reprojection half of
//! the measurement loop: every tick the session rebuilds one
//! [`ViewProjection`] from the camera frame and runs every anchor through it
//! so overlays can be drawn over the live feed.
//!
//! Projection can fail per point (a point can sit behind the eye or outside
//! the near/far range), so [`ViewProjection::project`] returns an `Option`.
//! Points that project do so without clamping: callers may receive pixel
//! coordinates outside the viewport bounds and are expected to cope.

#![no_std]

use num_traits::Float;
use roomscan_core::nalgebra::Matrix4;
use roomscan_core::{CameraFrame, Pose, ScreenPoint, WorldPoint, WorldToCamera};

/// Near clip plane distance in meters.
pub const NEAR_PLANE: f64 = 0.01;

/// Far clip plane distance in meters.
pub const FAR_PLANE: f64 = 100.0;

/// Clip-space `w` below this magnitude means the point is degenerate (on the
/// eye plane) and cannot be projected.
const W_EPSILON: f64 = 1e-9;

/// Pixel dimensions of the render target the overlay is drawn into.
///
/// Hosts report `0` dimensions mid-layout; callers check [`Viewport::is_empty`]
/// before building a projection from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the viewport has no drawable area.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. Only meaningful for a non-empty viewport.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The reticle position: the exact center of the viewport.
    pub fn center(self) -> ScreenPoint {
        ScreenPoint::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

/// The world-to-pixel transform for a single tick.
///
/// Combines the perspective projection (near [`NEAR_PLANE`], far
/// [`FAR_PLANE`], vertical fov from the camera frame, aspect from the
/// viewport) with the view transform (the inverse of the camera pose).
/// Build it once per tick and reuse it for every anchor.
///
/// ```
/// use core::f64::consts::FRAC_PI_2;
/// use roomscan_core::{CameraFrame, CameraToWorld, Pose, TrackingState, WorldPoint};
/// use roomscan_viewport::{ViewProjection, Viewport};
///
/// let frame = CameraFrame {
///     pose: CameraToWorld::identity(),
///     fov_y: FRAC_PI_2,
///     tracking: TrackingState::Tracking,
/// };
/// let projection = ViewProjection::new(&frame, Viewport::new(1000, 1000));
/// // A point straight ahead lands on the center of the viewport.
/// let screen = projection.project(WorldPoint::new(0.0, 0.0, -5.0)).unwrap();
/// assert!((screen.x - 500.0).abs() < 1e-9);
/// assert!((screen.y - 500.0).abs() < 1e-9);
/// // A point behind the camera does not project.
/// assert!(projection.project(WorldPoint::new(0.0, 0.0, 5.0)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    view: WorldToCamera,
    projection: Matrix4<f64>,
    viewport: Viewport,
}

impl ViewProjection {
    pub fn new(frame: &CameraFrame, viewport: Viewport) -> Self {
        Self {
            view: frame.pose.inverse(),
            projection: perspective(frame.fov_y, viewport.aspect()),
            viewport,
        }
    }

    /// Projects a world point to viewport pixel coordinates.
    ///
    /// Returns `None` when the point is degenerate or behind the eye
    /// (clip-space `w` near zero) or falls outside the near/far range.
    /// Screen Y grows downward; coordinates are not clamped to the viewport.
    pub fn project(&self, world: WorldPoint) -> Option<ScreenPoint> {
        let clip = self.projection * self.view.transform(world).homogeneous();
        let w = clip.w;
        if w.abs() <= W_EPSILON {
            return None;
        }
        let ndc_x = clip.x / w;
        let ndc_y = clip.y / w;
        let ndc_z = clip.z / w;
        if !(-1.0..=1.0).contains(&ndc_z) {
            return None;
        }
        let screen_x = (ndc_x + 1.0) * 0.5 * f64::from(self.viewport.width);
        let screen_y = (1.0 - (ndc_y + 1.0) * 0.5) * f64::from(self.viewport.height);
        Some(ScreenPoint::new(screen_x, screen_y))
    }
}

/// OpenGL-convention perspective matrix: the camera looks down -Z and
/// clip-space `w` ends up as the (positive) depth of points in front.
#[rustfmt::skip]
fn perspective(fov_y: f64, aspect: f64) -> Matrix4<f64> {
    let f = 1.0 / Float::tan(fov_y * 0.5);
    let depth = FAR_PLANE - NEAR_PLANE;
    Matrix4::new(
        f / aspect, 0.0,  0.0,                               0.0,
        0.0,        f,    0.0,                               0.0,
        0.0,        0.0,  -(FAR_PLANE + NEAR_PLANE) / depth, -2.0 * FAR_PLANE * NEAR_PLANE / depth,
        0.0,        0.0,  -1.0,                              0.0,
    )
}
