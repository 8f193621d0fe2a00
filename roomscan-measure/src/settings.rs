use serde::{Deserialize, Serialize};

/// The tunable thresholds of a measurement session.
///
/// Every field has a serde default, so a settings file only needs to name
/// the values it overrides.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSettings {
    /// Pixel radius within which the preview point snaps to an existing
    /// anchor.
    #[serde(default = "default_snap_pixel_radius")]
    pub snap_pixel_radius: f64,
    /// World-space radius in meters that validates a pixel-nearest snap.
    /// Guards against two points that coincide on screen but sit at very
    /// different depths.
    #[serde(default = "default_snap_world_radius")]
    pub snap_world_radius: f64,
    /// Maximum distance in meters from the camera at which a feature-point
    /// hit is trusted.
    #[serde(default = "default_feature_point_range")]
    pub feature_point_range: f64,
}

fn default_snap_pixel_radius() -> f64 {
    32.0
}

fn default_snap_world_radius() -> f64 {
    0.10
}

fn default_feature_point_range() -> f64 {
    3.0
}

impl Default for MeasureSettings {
    fn default() -> Self {
        Self {
            snap_pixel_radius: default_snap_pixel_radius(),
            snap_world_radius: default_snap_world_radius(),
            feature_point_range: default_feature_point_range(),
        }
    }
}
