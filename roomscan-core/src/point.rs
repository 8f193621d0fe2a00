use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point2, Point3, Vector4};
use num_traits::Float;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A 3d point in world coordinates.
///
/// The world frame is anchored by the tracking runtime when the session
/// starts; +Y is up and the unit of distance is meters. World points are
/// transient (the runtime re-resolves them every tick), so treat a
/// `WorldPoint` as a sample, not a stable identity. Stable identity is what
/// anchors are for.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct WorldPoint(pub Point3<f64>);

impl WorldPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// Retrieve the homogeneous coordinate of the point.
    pub fn homogeneous(self) -> Vector4<f64> {
        self.0.to_homogeneous()
    }

    /// Euclidean distance to another world point.
    ///
    /// ```
    /// use roomscan_core::WorldPoint;
    /// let a = WorldPoint::new(0.0, 0.0, 0.0);
    /// let b = WorldPoint::new(3.0, 4.0, 0.0);
    /// assert_eq!(a.distance(b), 5.0);
    /// ```
    pub fn distance(self, other: Self) -> f64 {
        Float::sqrt((self.0 - other.0).norm_squared())
    }
}

/// A 3d point relative to the camera's optical center and orientation, where
/// the positive X axis is right, the positive Y axis is up, and the camera
/// looks down the negative Z axis. The unit of distance is meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraPoint(pub Point3<f64>);

impl CameraPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// Retrieve the homogeneous coordinate of the point.
    pub fn homogeneous(self) -> Vector4<f64> {
        self.0.to_homogeneous()
    }

    /// Depth of the point along the camera's forward axis.
    ///
    /// Positive for points in front of the camera.
    pub fn depth(self) -> f64 {
        -self.0.z
    }
}

/// A 2d point on the viewport in pixel coordinates, +Y down, origin at the
/// top-left. Screen points are recomputed from anchors every tick and are
/// never persisted. They are not clamped to the viewport bounds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ScreenPoint(pub Point2<f64>);

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }

    /// Squared pixel distance to another screen point.
    ///
    /// Snap radii compare against this to avoid the square root.
    pub fn distance_squared(self, other: Self) -> f64 {
        (self.0 - other.0).norm_squared()
    }
}
